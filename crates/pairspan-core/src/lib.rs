//! Pairspan Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration and the
//! attachment service seam shared by the HTTP client and the terminal front end.

pub mod config;
pub mod error;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{FetchError, LogLevel, TransferError, GENERIC_TRANSFER_ERROR};
pub use models::{DateFormat, PairAggregate, UploadedFile};
pub use service::AttachmentService;
