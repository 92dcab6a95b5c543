//! Terminal front end for the work-log pipeline.
//!
//! [`RootView`] wires the [`DateFormatSelector`], the [`UploadController`] state machine and
//! the [`ResultsTable`] renderer to an [`pairspan_core::AttachmentService`].

pub mod controller;
pub mod selector;
pub mod table;
pub mod view;

pub use controller::{FetchDisposition, FetchTicket, TransferTicket, UploadController, UploadState};
pub use selector::DateFormatSelector;
pub use table::ResultsTable;
pub use view::RootView;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
