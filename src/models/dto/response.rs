use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{
    Quiz, StudyContent, TopicOutline, UnderstandingScore, UploadStatus, UploadedFileDetail,
};
use crate::services::pipeline_service::StepRecord;

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub vector_store_id: String,
    pub user_id: String,
    pub upload_details: Vec<UploadedFileDetail>,
}

impl UploadResponse {
    pub fn new(
        vector_store_id: String,
        user_id: String,
        upload_details: Vec<UploadedFileDetail>,
    ) -> Self {
        let succeeded = count_status(&upload_details, UploadStatus::Completed);
        let failed = count_status(&upload_details, UploadStatus::Failed);
        let message = format!(
            "Processed {} files. {} successful, {} failed.",
            upload_details.len(),
            succeeded,
            failed
        );

        Self {
            message,
            vector_store_id,
            user_id,
            upload_details,
        }
    }
}

fn count_status(details: &[UploadedFileDetail], status: UploadStatus) -> usize {
    details.iter().filter(|d| d.status == status).count()
}

#[derive(Debug, Clone, Serialize)]
pub struct FileDeletionFailure {
    pub file_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteFilesResponse {
    pub deleted: Vec<String>,
    pub failed: Vec<FileDeletionFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteFlowResponse {
    pub run_id: Uuid,
    pub topics: TopicOutline,
    pub quiz: Quiz,
    pub understanding: UnderstandingScore,
    pub curated_topics: TopicOutline,
    pub content: StudyContent,
    pub steps: Vec<StepRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::DocumentKind;

    fn detail(status: UploadStatus) -> UploadedFileDetail {
        UploadedFileDetail {
            filename: "notes.txt".to_string(),
            openai_file_id: None,
            vector_store_file_id: None,
            status,
            remote_status: None,
            error: None,
            kind: DocumentKind::CourseNote,
            sha256: String::new(),
            size_bytes: 0,
        }
    }

    #[test]
    fn test_upload_response_message_counts() {
        let response = UploadResponse::new(
            "vs_1".to_string(),
            "user".to_string(),
            vec![
                detail(UploadStatus::Completed),
                detail(UploadStatus::Failed),
                detail(UploadStatus::Pending),
            ],
        );

        assert_eq!(
            response.message,
            "Processed 3 files. 1 successful, 1 failed."
        );
    }
}
