//! Seam between the upload pipeline and the processing service
//!
//! The front end talks to the service only through [`AttachmentService`], so the HTTP
//! client can be swapped for an in-memory fake in tests.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{FetchError, TransferError};
use crate::models::{DateFormat, PairAggregate, UploadedFile};

#[async_trait]
pub trait AttachmentService: Send + Sync {
    /// Transfer a work-log file, tagging it with the date pattern the service must parse it with.
    async fn upload(&self, file: &Path, pattern: DateFormat)
        -> Result<UploadedFile, TransferError>;

    /// Retrieve the pair aggregates computed for a previously uploaded file.
    async fn fetch_pairs(&self, identifier: &str) -> Result<Vec<PairAggregate>, FetchError>;
}
