//! Domain models exchanged with the processing service.

pub mod attachment;
pub mod date_format;
pub mod pair;

pub use attachment::UploadedFile;
pub use date_format::{DateFormat, UnknownDateFormat};
pub use pair::PairAggregate;
