use serde::{Deserialize, Serialize};

/// Which form field an uploaded document arrived in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    CourseNote,
    PastExam,
}

impl DocumentKind {
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "course_notes" => Some(DocumentKind::CourseNote),
            "past_exams" => Some(DocumentKind::PastExam),
            _ => None,
        }
    }
}

/// A file received from the client, held in memory until it is uploaded.
#[derive(Clone, Debug)]
pub struct IncomingDocument {
    pub filename: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UploadedFileDetail {
    pub filename: String,
    pub openai_file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_store_file_id: Option<String>,
    pub status: UploadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub sha256: String,
    pub size_bytes: usize,
}

/// File object returned by the provider's file store.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteFile {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteFileError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

/// Association of a file with a vector store, including its indexing status.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct VectorStoreFile {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub last_error: Option<RemoteFileError>,
}

impl VectorStoreFile {
    pub fn is_in_progress(&self) -> bool {
        self.status == "in_progress"
    }

    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status.as_str(), "failed" | "cancelled")
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SearchHit {
    pub file_id: String,
    pub filename: String,
    pub score: f64,
    pub text: String,
}
