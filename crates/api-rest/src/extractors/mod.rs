//! Custom Axum extractors.
//!
//! Per-route request preconditions (multipart parsing, schema validation,
//! file storage) are expressed as extractors.

pub mod validated_upload;

pub use validated_upload::ValidatedUpload;
