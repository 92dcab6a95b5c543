use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work-log file accepted by the processing service.
///
/// The service keys computed results by the original file name, so the
/// identifier doubles as the lookup key for the result fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub identifier: String,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadedFile {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            uploaded_at: Utc::now(),
        }
    }
}
