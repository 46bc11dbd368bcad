//! Fluent builder pattern for constructing test data.

use chrono::{DateTime, Utc};
use postboard_application::PostDto;
use postboard_domain::{identifiers::PostId, post::Post};

/// Builder for creating Post test instances.
///
/// Builds the struct directly, so invalid posts can be constructed too.
#[derive(Clone)]
pub struct PostBuilder {
    id: PostId,
    title: String,
    body: String,
    file_path: String,
    created_at: DateTime<Utc>,
}

impl PostBuilder {
    pub fn new() -> Self {
        Self {
            id: PostId::new(),
            title: "Test post".to_string(),
            body: "Test body".to_string(),
            file_path: "uploads/1700000000000-test.png".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            body: self.body,
            file_path: self.file_path,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }

    pub fn build_dto(self) -> PostDto {
        self.build().into()
    }
}

impl Default for PostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

enum Part {
    Text {
        name: String,
        value: Vec<u8>,
    },
    File {
        name: String,
        filename: Option<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    },
}

/// Builder for `multipart/form-data` request bodies.
///
/// `build` returns the `Content-Type` header value and the encoded body.
pub struct MultipartBuilder {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self {
            boundary: format!("postboard-test-{}", uuid::Uuid::new_v4().simple()),
            parts: Vec::new(),
        }
    }

    /// Add a text field
    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.raw_text(name, value.into().into_bytes())
    }

    /// Add a field without a filename carrying arbitrary bytes
    pub fn raw_text(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a file field
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push(Part::File {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
            data: data.into(),
        });
        self
    }

    /// Add a file field the way browsers send an empty file input
    pub fn empty_file(mut self, name: impl Into<String>) -> Self {
        self.parts.push(Part::File {
            name: name.into(),
            filename: Some(String::new()),
            content_type: Some("application/octet-stream".to_string()),
            data: Vec::new(),
        });
        self
    }

    /// Add a title and body in one go
    pub fn post_fields(self, title: &str, body: &str) -> Self {
        self.text("title", title).text("body", body)
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn build(self) -> (String, Vec<u8>) {
        let content_type = self.content_type();
        let mut out = Vec::new();

        for part in &self.parts {
            out.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            match part {
                Part::Text { name, value } => {
                    out.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                            .as_bytes(),
                    );
                    out.extend_from_slice(value);
                }
                Part::File {
                    name,
                    filename,
                    content_type,
                    data,
                } => {
                    let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", name);
                    if let Some(filename) = filename {
                        disposition.push_str(&format!("; filename=\"{}\"", filename));
                    }
                    out.extend_from_slice(disposition.as_bytes());
                    out.extend_from_slice(b"\r\n");
                    if let Some(ct) = content_type {
                        out.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
                    }
                    out.extend_from_slice(b"\r\n");
                    out.extend_from_slice(data);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());

        (content_type, out)
    }
}

impl Default for MultipartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_builder() {
        let post = PostBuilder::new()
            .with_title("Custom")
            .with_file_path("uploads/x.txt")
            .build();
        assert_eq!(post.title, "Custom");
        assert_eq!(post.file_path, "uploads/x.txt");
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_multipart_layout() {
        let builder = MultipartBuilder::new();
        let boundary = builder.boundary.clone();
        let (content_type, body) = builder
            .text("title", "Hello")
            .file("file", "a.txt", "text/plain", b"abc".to_vec())
            .build();
        let body = String::from_utf8(body).unwrap();

        assert_eq!(
            content_type,
            format!("multipart/form-data; boundary={}", boundary)
        );
        assert!(body.contains("name=\"title\"\r\n\r\nHello\r\n"));
        assert!(body.contains("name=\"file\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nabc\r\n"));
        assert!(body.ends_with(&format!("--{}--\r\n", boundary)));
    }
}
