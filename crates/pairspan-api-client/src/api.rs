//! Attachment endpoints of the processing service.
//!
//! `POST {prefix}/upload?pattern=..` accepts the work-log file; `GET {prefix}/{file name}`
//! returns the pair aggregates computed for it.

use std::path::{Component, Path};

use async_trait::async_trait;
use pairspan_core::{
    AttachmentService, DateFormat, FetchError, PairAggregate, TransferError, UploadedFile,
};

use crate::{ApiClient, ApiError};

impl ApiClient {
    /// Upload a work-log file from a local path. The returned identifier is the file name.
    pub async fn upload_attachment(
        &self,
        file_path: &Path,
        pattern: DateFormat,
    ) -> Result<UploadedFile, ApiError> {
        if file_path
            .components()
            .any(|c| c == Component::ParentDir)
        {
            return Err(ApiError::InvalidInput(format!(
                "{} must not contain '..'",
                file_path.display()
            )));
        }

        let filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                ApiError::InvalidInput(format!("{} has no file name", file_path.display()))
            })?
            .to_string();

        let buffer = tokio::fs::read(file_path)
            .await
            .map_err(|source| ApiError::Io {
                path: file_path.display().to_string(),
                source,
            })?;

        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(buffer).file_name(filename.clone()),
        );

        self.post_multipart(
            &self.attachments_url_path("/upload"),
            &[("pattern", pattern.as_pattern())],
            form,
        )
        .await?;

        tracing::info!(file = %filename, %pattern, "Uploaded attachment");
        Ok(UploadedFile::new(filename))
    }

    /// Get the pair aggregates computed for an uploaded file.
    pub async fn get_attachment_pairs(
        &self,
        identifier: &str,
    ) -> Result<Vec<PairAggregate>, ApiError> {
        if identifier.is_empty() {
            return Err(ApiError::InvalidInput(
                "file identifier must not be empty".to_string(),
            ));
        }

        let path = self.attachments_url_path(&format!("/{}", urlencoding::encode(identifier)));
        self.get(&path, &[]).await
    }
}

#[async_trait]
impl AttachmentService for ApiClient {
    async fn upload(
        &self,
        file: &Path,
        pattern: DateFormat,
    ) -> Result<UploadedFile, TransferError> {
        Ok(self.upload_attachment(file, pattern).await?)
    }

    async fn fetch_pairs(&self, identifier: &str) -> Result<Vec<PairAggregate>, FetchError> {
        Ok(self.get_attachment_pairs(identifier).await?)
    }
}
