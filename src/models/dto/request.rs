use once_cell::sync::Lazy;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::domain::{
    QuizAnswer, QuizQuestion, QuizSubmission, StudyContent, Topic, TopicOutline,
    UnderstandingScore,
};

static USER_ID_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[A-Za-z0-9_-]{1,128}$").expect("USER_ID_REGEX is a valid regex pattern")
});

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TopicRequest {
    #[validate(
        length(min = 1, max = 500),
        custom(function = "validate_not_blank")
    )]
    pub subject: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateQuizRequest {
    pub list_quiz_questions: Vec<QuizQuestion>,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CurateTopicsRequest {
    #[validate(nested)]
    pub request: TopicRequest,
    pub understanding: UnderstandingScore,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateContentRequest {
    #[validate(length(min = 1, message = "list_of_topics must contain at least one topic"))]
    pub list_of_topics: Vec<Topic>,
    #[serde(default)]
    pub scores: Option<UnderstandingScore>,
}

impl GenerateContentRequest {
    pub fn into_parts(self) -> (TopicOutline, Option<UnderstandingScore>) {
        (
            TopicOutline {
                list_of_topics: self.list_of_topics,
            },
            self.scores,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleTopicRequest {
    pub topic: Topic,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteFlowRequest {
    #[validate(nested)]
    pub request: TopicRequest,
    #[serde(default)]
    pub quiz_submission: QuizSubmission,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteVectorFilesRequest {
    #[validate(length(min = 1, message = "vector_store_file_ids must not be empty"))]
    pub vector_store_file_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportMarkdownRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub content: StudyContent,
}

/// Validates the `user_id` form field of an upload.
pub fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if USER_ID_REGEX.is_match(user_id) {
        Ok(())
    } else {
        Err(ValidationError::new("user_id").with_message(
            "User ID is required and must be 1-128 letters, digits, '_' or '-'".into(),
        ))
    }
}
