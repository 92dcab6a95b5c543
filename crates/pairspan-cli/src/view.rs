use std::path::Path;
use std::sync::Arc;

use pairspan_core::models::UnknownDateFormat;
use pairspan_core::{AttachmentService, DateFormat, FetchError};
use tokio_util::sync::CancellationToken;

use crate::controller::{FetchDisposition, UploadController};
use crate::selector::DateFormatSelector;
use crate::table::ResultsTable;

/// Composes the selector, the upload controller and the results table around one service.
pub struct RootView {
    selector: DateFormatSelector,
    controller: UploadController,
    service: Arc<dyn AttachmentService>,
}

impl RootView {
    pub fn new(service: Arc<dyn AttachmentService>) -> Self {
        Self::with_cancellation(service, CancellationToken::new())
    }

    /// Cancelling `session` abandons whatever fetch is in flight.
    pub fn with_cancellation(
        service: Arc<dyn AttachmentService>,
        session: CancellationToken,
    ) -> Self {
        Self {
            selector: DateFormatSelector::new(),
            controller: UploadController::with_cancellation(session),
            service,
        }
    }

    pub fn controller(&self) -> &UploadController {
        &self.controller
    }

    pub fn select_format(&mut self, format: DateFormat) {
        self.selector.select(format);
    }

    pub fn select_pattern(&mut self, pattern: &str) -> Result<DateFormat, UnknownDateFormat> {
        self.selector.select_pattern(pattern)
    }

    /// Transfer `file`, then load its results. Returns what happened to the fetch,
    /// or `None` when the transfer itself failed or was cancelled.
    pub async fn submit(&mut self, file: &Path) -> Option<FetchDisposition> {
        let transfer = self.controller.on_transfer_start(self.selector.current());
        let cancel = transfer.cancellation();
        let outcome = tokio::select! {
            _ = cancel.cancelled() => None,
            result = self.service.upload(file, transfer.pattern()) => Some(result),
        };
        let Some(outcome) = outcome else {
            self.controller.on_transfer_cancelled(transfer);
            return None;
        };

        let fetch = self.controller.on_transfer_complete(transfer, outcome)?;
        let cancel = fetch.cancellation();
        let outcome = tokio::select! {
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.service.fetch_pairs(fetch.identifier()) => result,
        };

        Some(self.controller.on_fetch_complete(fetch, outcome))
    }

    pub fn remove(&mut self) {
        self.controller.on_remove();
    }

    pub fn error(&self) -> Option<&'static str> {
        self.controller.error()
    }

    pub fn table(&self) -> Option<ResultsTable> {
        self.controller.table()
    }

    pub fn render(&self) -> String {
        let mut out = format!("Date format: {}\n", self.selector.current());

        if let Some(file) = self.controller.file() {
            out.push_str(&format!(
                "File: {} (uploaded {})\n\n",
                file.identifier,
                file.uploaded_at.format("%Y-%m-%d %H:%M:%S")
            ));
            if let Some(table) = self.controller.table() {
                out.push_str(&table.render());
            }
        }

        if let Some(error) = self.controller.error() {
            out.push_str(&format!("\n{}\n", error));
        }

        out
    }

    /// JSON array of the displayed rows, or `None` when no table is shown.
    pub fn render_json(&self) -> serde_json::Result<Option<String>> {
        self.controller.table().map(|t| t.to_json()).transpose()
    }
}
