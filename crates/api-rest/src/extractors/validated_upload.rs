//! Validated multipart upload extractor.
//!
//! Reads a `multipart/form-data` body, validates its text fields against a
//! schema and only then writes the single `file` part to storage. Handlers
//! receive the parsed schema plus the stored file, if one was sent.

use crate::{error::ApiError, state::AppState};
use axum::{
    async_trait,
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, Multipart, Request,
    },
    http::StatusCode,
};
use bytes::{Bytes, BytesMut};
use postboard_application::ValidatorExt;
use postboard_domain::post::StoredFile;
use postboard_infrastructure::generate_key;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument};
use validator::Validate;

/// Form field that carries the upload
pub const FILE_FIELD: &str = "file";

/// Multipart extractor with schema validation and file storage
#[derive(Debug, Clone)]
pub struct ValidatedUpload<T> {
    /// Validated text fields
    pub data: T,

    /// Stored upload; `None` when the request carried no file
    pub file: Option<StoredFile>,
}

struct PendingFile {
    original_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

#[async_trait]
impl<T> FromRequest<AppState> for ValidatedUpload<T>
where
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    #[instrument(skip_all)]
    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        let max_file_size = state.config.max_file_size;
        let mut fields = Map::new();
        let mut pending: Option<PendingFile> = None;
        let mut seen_file = false;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_none() {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                let value = String::from_utf8(bytes.to_vec()).map_err(|_| {
                    ApiError::BadRequest(format!(
                        "Invalid form data: {} is not valid UTF-8",
                        name
                    ))
                })?;
                fields.insert(name, Value::String(value));
                continue;
            }

            if name != FILE_FIELD || seen_file {
                return Err(ApiError::BadRequest(format!("Unexpected field: {}", name)));
            }
            seen_file = true;

            let original_name = field
                .file_name()
                .map(str::to_string)
                .filter(|n| !n.is_empty());
            let content_type = field.content_type().map(str::to_string);
            let data = read_limited(field, max_file_size).await?;

            if original_name.is_none() && data.is_empty() {
                debug!("Empty file part ignored");
                continue;
            }

            pending = Some(PendingFile {
                original_name,
                content_type,
                data,
            });
        }

        let data: T = serde_json::from_value(Value::Object(fields))
            .map_err(|e| ApiError::BadRequest(format!("Invalid form data: {}", e)))?;

        let validation = data.to_validation_result();
        if !validation.valid {
            return Err(ApiError::Validation(validation.message()));
        }

        let file = match pending {
            Some(pending) => Some(store(state, pending).await?),
            None => None,
        };

        Ok(Self { data, file })
    }
}

async fn read_limited(mut field: Field<'_>, limit: u64) -> Result<Bytes, ApiError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (buf.len() + chunk.len()) as u64 > limit {
            return Err(ApiError::PayloadTooLarge(format!(
                "File exceeds the maximum size of {} bytes",
                limit
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

async fn store(state: &AppState, pending: PendingFile) -> Result<StoredFile, ApiError> {
    let key = generate_key(pending.original_name.as_deref());
    let size = pending.data.len() as u64;

    let path = state
        .storage
        .upload(&key, pending.data, pending.content_type.as_deref())
        .await?;

    debug!(path = %path, size, "Upload stored");
    Ok(StoredFile {
        path,
        original_name: pending.original_name,
        content_type: pending.content_type,
        size,
    })
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}
