use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{RemoteFile, SearchHit, VectorStoreFile};

const REQUEST_TIMEOUT_SECS: u64 = 120;
const FILE_PURPOSE: &str = "assistants";

/// File storage and semantic search over a hosted vector store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStoreClient: Send + Sync {
    async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> AppResult<RemoteFile>;

    /// Attaches an uploaded file and waits for indexing to settle. A file
    /// still `in_progress` after the last poll, or when a poll fails, is
    /// returned as-is.
    async fn attach_file(&self, vector_store_id: &str, file_id: &str)
        -> AppResult<VectorStoreFile>;

    async fn detach_file(&self, vector_store_id: &str, file_id: &str) -> AppResult<()>;

    async fn delete_file(&self, file_id: &str) -> AppResult<()>;

    async fn search(
        &self,
        vector_store_id: &str,
        query: &str,
        max_results: usize,
    ) -> AppResult<Vec<SearchHit>>;
}

pub struct OpenAiVectorStoreClient {
    http: reqwest::Client,
    api_base: String,
    api_key: SecretString,
    poll_interval: Duration,
    max_polls: u32,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    file_id: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    content: Vec<SearchContent>,
}

#[derive(Deserialize)]
struct SearchContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl From<SearchResult> for SearchHit {
    fn from(result: SearchResult) -> Self {
        let text = result
            .content
            .into_iter()
            .filter(|part| part.kind == "text")
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("\n");

        SearchHit {
            file_id: result.file_id,
            filename: result.filename,
            score: result.score,
            text,
        }
    }
}

impl OpenAiVectorStoreClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::ConfigurationError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.openai_api_base.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            poll_interval: config.vector_store_poll_interval(),
            max_polls: config.vector_store_max_polls,
        })
    }

    pub fn with_polling(mut self, poll_interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = poll_interval;
        self.max_polls = max_polls;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(self.api_key.expose_secret())
            .header("OpenAI-Beta", "assistants=v2")
    }

    async fn fetch_vector_store_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> AppResult<VectorStoreFile> {
        let response = self
            .authorized(self.http.get(self.url(&format!(
                "/vector_stores/{}/files/{}",
                vector_store_id, file_id
            ))))
            .send()
            .await?;

        Ok(ensure_success("retrieve vector store file", response)
            .await?
            .json()
            .await?)
    }
}

async fn ensure_success(operation: &str, response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::UpstreamError(format!(
        "{} failed with status {}: {}",
        operation,
        status.as_u16(),
        body
    )))
}

/// Deletes treat an already-missing resource as done.
async fn ensure_deleted(operation: &str, response: Response) -> AppResult<()> {
    if response.status() == StatusCode::NOT_FOUND {
        log::info!("{}: resource already absent", operation);
        return Ok(());
    }
    ensure_success(operation, response).await.map(|_| ())
}

#[async_trait]
impl VectorStoreClient for OpenAiVectorStoreClient {
    async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> AppResult<RemoteFile> {
        let form = multipart::Form::new().text("purpose", FILE_PURPOSE).part(
            "file",
            multipart::Part::bytes(bytes).file_name(filename.to_string()),
        );

        let response = self
            .authorized(self.http.post(self.url("/files")))
            .multipart(form)
            .send()
            .await?;

        Ok(ensure_success("upload file", response).await?.json().await?)
    }

    async fn attach_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> AppResult<VectorStoreFile> {
        let response = self
            .authorized(
                self.http
                    .post(self.url(&format!("/vector_stores/{}/files", vector_store_id))),
            )
            .json(&json!({ "file_id": file_id }))
            .send()
            .await?;

        let mut file: VectorStoreFile = ensure_success("attach file", response)
            .await?
            .json()
            .await?;

        let mut polls = 0;
        while file.is_in_progress() && polls < self.max_polls {
            tokio::time::sleep(self.poll_interval).await;
            polls += 1;
            match self.fetch_vector_store_file(vector_store_id, &file.id).await {
                Ok(latest) => file = latest,
                Err(err) => {
                    // Already attached; report the last known status.
                    log::warn!("Status poll for vector store file {} failed: {}", file.id, err);
                    break;
                }
            }
        }

        log::debug!(
            "Vector store file {} settled at status {} after {} poll(s)",
            file.id,
            file.status,
            polls
        );
        Ok(file)
    }

    async fn detach_file(&self, vector_store_id: &str, file_id: &str) -> AppResult<()> {
        let response = self
            .authorized(self.http.delete(self.url(&format!(
                "/vector_stores/{}/files/{}",
                vector_store_id, file_id
            ))))
            .send()
            .await?;

        ensure_deleted("detach file", response).await
    }

    async fn delete_file(&self, file_id: &str) -> AppResult<()> {
        let response = self
            .authorized(self.http.delete(self.url(&format!("/files/{}", file_id))))
            .send()
            .await?;

        ensure_deleted("delete file", response).await
    }

    async fn search(
        &self,
        vector_store_id: &str,
        query: &str,
        max_results: usize,
    ) -> AppResult<Vec<SearchHit>> {
        let response = self
            .authorized(
                self.http
                    .post(self.url(&format!("/vector_stores/{}/search", vector_store_id))),
            )
            .json(&json!({ "query": query, "max_num_results": max_results }))
            .send()
            .await?;

        let parsed: SearchResponse = ensure_success("search vector store", response)
            .await?
            .json()
            .await?;

        Ok(parsed.data.into_iter().map(SearchHit::from).collect())
    }
}
