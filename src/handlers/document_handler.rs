use std::sync::Arc;

use actix_multipart::{Field, Multipart};
use actix_web::{post, web, HttpRequest, HttpResponse};
use futures::TryStreamExt;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::get_request_id,
    models::{
        domain::{DocumentKind, IncomingDocument},
        dto::request::DeleteVectorFilesRequest,
    },
};

const MAX_USER_ID_BYTES: usize = 1024;
const DEFAULT_UPLOAD_NAME: &str = "upload";

/// Reads a multipart field into memory, failing once it exceeds `limit` bytes.
async fn read_field(field: &mut Field, name: &str, limit: usize) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if bytes.len() + chunk.len() > limit {
            return Err(AppError::ValidationError(format!(
                "{}: exceeds the {} byte limit",
                name, limit
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

#[post("/upload-files")]
pub async fn upload_files(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let max_upload_bytes = state.config.max_upload_bytes;
    let mut user_id: Option<String> = None;
    let mut documents = Vec::new();

    while let Some(mut field) = payload.try_next().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name == "user_id" {
            let raw = read_field(&mut field, "user_id", MAX_USER_ID_BYTES).await?;
            let value = String::from_utf8(raw).map_err(|_| {
                AppError::ValidationError("user_id: must be valid UTF-8".to_string())
            })?;
            user_id = Some(value.trim().to_string());
            continue;
        }

        let Some(kind) = DocumentKind::from_field_name(&field_name) else {
            log::debug!("Skipping unexpected multipart field '{}'", field_name);
            read_field(&mut field, &field_name, max_upload_bytes).await?;
            continue;
        };

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string());

        let bytes = read_field(&mut field, &filename, max_upload_bytes).await?;
        documents.push(IncomingDocument {
            filename,
            kind,
            bytes,
        });
    }

    let user_id = user_id.unwrap_or_default();
    log::info!(
        "[{}] Received {} document(s) for upload",
        get_request_id(&req).unwrap_or_else(|| "-".to_string()),
        documents.len()
    );

    let response = state
        .document_service
        .upload_documents(&user_id, documents)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/delete-vector-files")]
pub async fn delete_vector_files(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<DeleteVectorFilesRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    log::info!(
        "[{}] Deleting {} vector store file(s)",
        get_request_id(&req).unwrap_or_else(|| "-".to_string()),
        request.vector_store_file_ids.len()
    );

    let response = state
        .document_service
        .delete_documents(&request.vector_store_file_ids)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
