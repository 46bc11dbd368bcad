//! Post entity and uploaded-file metadata.

use crate::errors::ValidationError;
use crate::identifiers::PostId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters in a post title.
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum number of characters in a post body.
pub const BODY_MAX_LEN: usize = 10_000;

/// A post: a title, a body and the path of the file uploaded with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier
    pub id: PostId,

    /// Post title
    pub title: String,

    /// Post body
    pub body: String,

    /// Storage path (or object key) of the attached file
    pub file_path: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post, checking the entity invariants.
    ///
    /// Title and body are trimmed before they are stored.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into().trim().to_string();
        let body = body.into().trim().to_string();
        let file_path = file_path.into();

        check_text("title", &title, TITLE_MAX_LEN)?;
        check_text("body", &body, BODY_MAX_LEN)?;
        if file_path.trim().is_empty() {
            return Err(ValidationError::field("file_path", "must not be empty"));
        }

        let now = Utc::now();
        Ok(Self {
            id: PostId::new(),
            title,
            body,
            file_path,
            created_at: now,
            updated_at: now,
        })
    }
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::field(field, "must not be empty"));
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::field(
            field,
            format!("must be at most {} characters (got {})", max, len),
        ));
    }
    Ok(())
}

/// Metadata attached to a request once its upload has been written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Path (local storage) or object key (S3) the file was written to
    pub path: String,

    /// Filename as sent by the client, if any
    pub original_name: Option<String>,

    /// Content type as sent by the client, if any
    pub content_type: Option<String>,

    /// Size in bytes
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_trims_text() {
        let post = Post::new("  Title ", "\nBody\n", "uploads/x.png").unwrap();
        assert_eq!(post.title, "Title");
        assert_eq!(post.body, "Body");
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = Post::new("   ", "body", "uploads/x.png").unwrap_err();
        assert_eq!(err.to_string(), "title must not be empty");
    }

    #[test]
    fn test_missing_file_path_rejected() {
        assert!(Post::new("title", "body", "").is_err());
    }

    #[test]
    fn test_title_length_counts_characters() {
        let title = "é".repeat(TITLE_MAX_LEN);
        assert!(Post::new(title, "body", "uploads/x.png").is_ok());

        let title = "a".repeat(TITLE_MAX_LEN + 1);
        assert!(Post::new(title, "body", "uploads/x.png").is_err());
    }

    #[test]
    fn test_post_serialization_field_names() {
        let post = Post::new("t", "b", "uploads/f.txt").unwrap();
        let value = serde_json::to_value(&post).unwrap();
        for key in ["id", "title", "body", "file_path", "created_at", "updated_at"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn stored_text_is_trimmed(title in "[ \t]{0,3}[a-z]{1,50}[ \t]{0,3}") {
                let post = Post::new(title.clone(), "body", "uploads/x.png").unwrap();
                prop_assert_eq!(post.title, title.trim());
            }

            #[test]
            fn overlong_bodies_rejected(extra in 1usize..64) {
                let body = "b".repeat(BODY_MAX_LEN + extra);
                prop_assert!(Post::new("title", body, "uploads/x.png").is_err());
            }
        }
    }
}
