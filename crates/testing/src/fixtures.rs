//! Test fixtures for generating domain entities with realistic data.

use fake::{
    faker::{
        filesystem::en::FileExtension,
        lorem::en::{Paragraph, Sentence, Word},
    },
    Fake,
};
use postboard_domain::post::{Post, StoredFile, BODY_MAX_LEN, TITLE_MAX_LEN};
use proptest::prelude::*;

/// Create a test post with random title and body
pub fn create_test_post() -> Post {
    create_test_post_with_file(&create_test_file_path())
}

/// Create a test post pointing at a specific stored file
pub fn create_test_post_with_file(file_path: &str) -> Post {
    let mut title: String = Sentence(2..6).fake();
    title.truncate(TITLE_MAX_LEN);
    let body: String = Paragraph(1..3).fake();
    Post::new(title, body, file_path).expect("fixture post must be valid")
}

/// Random stored-file path in the shape the upload layer produces
pub fn create_test_file_path() -> String {
    let ext: String = FileExtension().fake();
    format!(
        "uploads/{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        ext.to_ascii_lowercase()
    )
}

/// Create stored-file metadata for a small upload
pub fn create_test_stored_file() -> StoredFile {
    let name: String = Word().fake();
    StoredFile {
        path: create_test_file_path(),
        original_name: Some(format!("{}.png", name)),
        content_type: Some("image/png".to_string()),
        size: 128,
    }
}

/// Random bytes standing in for an uploaded file
pub fn create_test_file_contents(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Strategy for titles that pass validation
pub fn valid_title() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ]{0,80}".prop_map(|s| s.trim_end().to_string())
}

/// Strategy for bodies that pass validation
pub fn valid_body() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .,!?\n]{0,400}".prop_map(|s| s.trim_end().to_string())
}

/// Strategy for titles that are too long after trimming
pub fn overlong_title() -> impl Strategy<Value = String> {
    (TITLE_MAX_LEN + 1..TITLE_MAX_LEN + 50).prop_map(|n| "t".repeat(n))
}

/// Strategy for bodies that are too long after trimming
pub fn overlong_body() -> impl Strategy<Value = String> {
    (BODY_MAX_LEN + 1..BODY_MAX_LEN + 10).prop_map(|n| "b".repeat(n))
}

/// Strategy for whitespace-only strings
pub fn blank_text() -> impl Strategy<Value = String> {
    "[ \t\n]{0,10}"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_post() {
        let post = create_test_post();
        assert!(!post.title.is_empty());
        assert!(!post.body.is_empty());
        assert!(post.file_path.starts_with("uploads/"));
    }

    #[test]
    fn test_create_test_stored_file() {
        let file = create_test_stored_file();
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(file.size, 128);
    }

    proptest! {
        #[test]
        fn valid_titles_build_posts(title in valid_title(), body in valid_body()) {
            prop_assert!(Post::new(title, body, "uploads/a.png").is_ok());
        }

        #[test]
        fn blank_titles_are_rejected(title in blank_text()) {
            prop_assert!(Post::new(title, "body", "uploads/a.png").is_err());
        }
    }
}
