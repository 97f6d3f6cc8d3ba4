use std::sync::Arc;

use futures::future::join_all;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{
    DocumentKind, IncomingDocument, SearchHit, UploadStatus, UploadedFileDetail,
};
use crate::models::dto::request::validate_user_id;
use crate::models::dto::response::{DeleteFilesResponse, FileDeletionFailure, UploadResponse};
use crate::services::vector_store_client::VectorStoreClient;

/// Moves learner documents in and out of the configured vector store and
/// retrieves excerpts from them for grounding.
pub struct DocumentService {
    client: Arc<dyn VectorStoreClient>,
    vector_store_id: Option<String>,
    max_upload_bytes: usize,
    retrieval_max_results: usize,
}

impl DocumentService {
    pub fn new(client: Arc<dyn VectorStoreClient>, config: &Config) -> Self {
        Self {
            client,
            vector_store_id: config.vector_store_id.clone(),
            max_upload_bytes: config.max_upload_bytes,
            retrieval_max_results: config.retrieval_max_results,
        }
    }

    pub fn vector_store_id(&self) -> Option<&str> {
        self.vector_store_id.as_deref()
    }

    fn require_vector_store(&self) -> AppResult<&str> {
        self.vector_store_id().ok_or_else(|| {
            AppError::ConfigurationError(
                "OPENAI_VECTOR_STORE_ID not found. Ensure .env file is present and configured."
                    .to_string(),
            )
        })
    }

    pub async fn upload_documents(
        &self,
        user_id: &str,
        documents: Vec<IncomingDocument>,
    ) -> AppResult<UploadResponse> {
        validate_user_id(user_id).map_err(|e| {
            AppError::ValidationError(format!(
                "user_id: {}",
                e.message.unwrap_or_else(|| "is invalid".into())
            ))
        })?;

        if !documents
            .iter()
            .any(|doc| doc.kind == DocumentKind::CourseNote)
        {
            return Err(AppError::ValidationError(
                "course_notes: at least one course notes file is required".to_string(),
            ));
        }

        if let Some(doc) = documents
            .iter()
            .find(|doc| doc.bytes.len() > self.max_upload_bytes)
        {
            return Err(AppError::ValidationError(format!(
                "{}: file is {} bytes, larger than the {} byte limit",
                doc.filename,
                doc.bytes.len(),
                self.max_upload_bytes
            )));
        }

        let vector_store_id = self.require_vector_store()?;

        log::info!(
            "Uploading {} file(s) for user {} to vector store {}",
            documents.len(),
            user_id,
            vector_store_id
        );

        let details = join_all(
            documents
                .into_iter()
                .map(|doc| self.upload_one(vector_store_id, doc)),
        )
        .await;

        if !details
            .iter()
            .any(|detail| detail.status == UploadStatus::Completed)
        {
            log::error!("No files were uploaded successfully for user {}", user_id);
            return Err(AppError::UpstreamError(
                "Failed to upload any files to the vector store".to_string(),
            ));
        }

        let response = UploadResponse::new(
            vector_store_id.to_string(),
            user_id.to_string(),
            details,
        );
        log::info!("{}", response.message);
        Ok(response)
    }

    async fn upload_one(&self, vector_store_id: &str, doc: IncomingDocument) -> UploadedFileDetail {
        let mut detail = UploadedFileDetail {
            sha256: format!("{:x}", Sha256::digest(&doc.bytes)),
            size_bytes: doc.bytes.len(),
            filename: doc.filename,
            kind: doc.kind,
            openai_file_id: None,
            vector_store_file_id: None,
            status: UploadStatus::Failed,
            remote_status: None,
            error: None,
        };

        let remote = match self.client.upload_file(&detail.filename, doc.bytes).await {
            Ok(remote) => remote,
            Err(err) => {
                log::error!("Failed to upload {}: {}", detail.filename, err);
                detail.error = Some(err.to_string());
                return detail;
            }
        };
        detail.openai_file_id = Some(remote.id.clone());

        let attached = match self.client.attach_file(vector_store_id, &remote.id).await {
            Ok(file) => file,
            Err(err) => {
                log::error!(
                    "Failed to attach {} ({}) to vector store: {}",
                    detail.filename,
                    remote.id,
                    err
                );
                if let Err(cleanup) = self.client.delete_file(&remote.id).await {
                    log::warn!("Could not delete orphaned file {}: {}", remote.id, cleanup);
                }
                detail.error = Some(err.to_string());
                return detail;
            }
        };

        detail.vector_store_file_id = Some(attached.id.clone());
        if attached.is_completed() {
            detail.status = UploadStatus::Completed;
        } else if attached.is_failed() {
            detail.remote_status = Some(attached.status.clone());
            detail.error = Some(
                attached
                    .last_error
                    .map(|e| e.message)
                    .unwrap_or_else(|| format!("indexing ended with status {}", attached.status)),
            );
        } else {
            detail.status = UploadStatus::Pending;
            detail.remote_status = Some(attached.status);
        }

        detail
    }

    pub async fn delete_documents(&self, file_ids: &[String]) -> AppResult<DeleteFilesResponse> {
        let vector_store_id = self.require_vector_store()?;
        let mut response = DeleteFilesResponse::default();

        for file_id in file_ids {
            let result = match self.client.detach_file(vector_store_id, file_id).await {
                Ok(()) => self.client.delete_file(file_id).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(()) => response.deleted.push(file_id.clone()),
                Err(err) => {
                    log::error!("Failed to delete file {}: {}", file_id, err);
                    response.failed.push(FileDeletionFailure {
                        file_id: file_id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        log::info!(
            "Deleted {} file(s), {} failed",
            response.deleted.len(),
            response.failed.len()
        );
        Ok(response)
    }

    /// Excerpts relevant to `query`, or nothing when no store is configured
    /// or the search fails.
    pub async fn retrieve_context(&self, query: &str) -> Vec<SearchHit> {
        let Some(vector_store_id) = self.vector_store_id() else {
            return Vec::new();
        };

        match self
            .client
            .search(vector_store_id, query, self.retrieval_max_results)
            .await
        {
            Ok(mut hits) => {
                hits.truncate(self.retrieval_max_results);
                log::debug!("Retrieved {} excerpt(s) for grounding", hits.len());
                hits
            }
            Err(err) => {
                log::warn!("Vector store search failed, continuing without grounding: {}", err);
                Vec::new()
            }
        }
    }
}
