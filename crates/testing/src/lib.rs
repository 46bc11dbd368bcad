//! Testing utilities for Postboard
//!
//! This crate provides:
//! - Test fixtures for posts and uploads
//! - Builder patterns for posts and multipart request bodies
//! - Mock implementations of the repository, event publisher, post service
//!   and file storage
//! - Property-based testing strategies
//!
//! # Examples
//!
//! ```
//! use postboard_testing::{builders::*, fixtures::*};
//!
//! let post = create_test_post();
//! assert!(!post.title.is_empty());
//!
//! let (content_type, body) = MultipartBuilder::new()
//!     .text("title", "Hello")
//!     .text("body", "World")
//!     .file("file", "photo.png", "image/png", b"png-bytes".to_vec())
//!     .build();
//! assert!(content_type.starts_with("multipart/form-data; boundary="));
//! assert!(!body.is_empty());
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
