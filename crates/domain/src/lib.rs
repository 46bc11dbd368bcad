//! Postboard Domain Types
//!
//! This crate provides the core domain model for Postboard: posts created
//! from a multipart form submission together with the file that was uploaded
//! alongside them.
//!
//! ## Architecture
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers
//! - **post**: The `Post` entity and the metadata of a stored upload
//! - **errors**: Error types with error codes and HTTP status hints
//!
//! ## Usage
//!
//! ```rust
//! use postboard_domain::post::Post;
//!
//! let post = Post::new("Hello", "First post", "uploads/1700000000000-a.png").unwrap();
//! assert_eq!(post.title, "Hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod post;

pub use errors::{AppError, AppResult, PostError, StorageError, ValidationError};
pub use identifiers::PostId;
pub use post::{Post, StoredFile};
