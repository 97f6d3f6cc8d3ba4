use std::sync::Arc;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{
    ContentMain, QuizAnswer, Quiz, StudyContent, Topic, TopicOutline, UnderstandingScore,
};
use crate::models::dto::request::{CurateTopicsRequest, EvaluateQuizRequest, TopicRequest};
use crate::services::agent_definitions::{
    CONTENT_WRITER_AGENT, CURATED_TOPIC_OUTLINE_AGENT, QUIZ_AGENT, SINGLE_TOPIC_WRITER_AGENT,
    TOPIC_OUTLINE_AGENT,
};
use crate::services::agent_runner::{AgentDefinition, AgentExecutor};
use crate::services::document_service::DocumentService;
use crate::services::prompt_builder::PromptBuilder;
use crate::services::understanding_service::UnderstandingScorer;

pub struct StudyPlanService {
    executor: AgentExecutor,
    documents: Arc<DocumentService>,
}

impl StudyPlanService {
    pub fn new(executor: AgentExecutor, documents: Arc<DocumentService>) -> Self {
        Self {
            executor,
            documents,
        }
    }

    async fn run_agent<T>(
        &self,
        agent: &AgentDefinition,
        input: String,
        retrieval_query: &str,
    ) -> AppResult<T>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let input = if agent.grounded {
            let hits = self.documents.retrieve_context(retrieval_query).await;
            PromptBuilder::with_reference_context(input, &hits)
        } else {
            input
        };

        self.executor.run::<T>(agent, input).await
    }

    pub async fn generate_topics(&self, request: &TopicRequest) -> AppResult<TopicOutline> {
        request.validate()?;
        let subject = request.subject.trim();

        let outline: TopicOutline = self
            .run_agent(&TOPIC_OUTLINE_AGENT, subject.to_string(), subject)
            .await?;

        if outline.is_empty() {
            return Err(AppError::MalformedUpstreamResponse(format!(
                "{} returned no topics",
                TOPIC_OUTLINE_AGENT.name
            )));
        }

        log::info!("Generated {} topics for '{}'", outline.len(), subject);
        Ok(outline)
    }

    pub async fn generate_quiz(&self, outline: &TopicOutline) -> AppResult<Quiz> {
        outline.validate()?;

        let quiz: Quiz = self
            .run_agent(
                &QUIZ_AGENT,
                PromptBuilder::quiz_prompt(outline),
                &outline.search_query(),
            )
            .await?;

        if quiz.is_empty() {
            return Err(AppError::MalformedUpstreamResponse(format!(
                "{} returned no questions",
                QUIZ_AGENT.name
            )));
        }

        log::info!(
            "Generated {} quiz questions over {} topics",
            quiz.len(),
            outline.len()
        );
        Ok(quiz)
    }

    /// Scores a submission after rejecting out-of-range and duplicate answers.
    pub fn evaluate_quiz(&self, request: &EvaluateQuizRequest) -> AppResult<UnderstandingScore> {
        UnderstandingScorer::validate_submission(
            request.list_quiz_questions.len(),
            &request.answers,
        )?;

        let understanding =
            UnderstandingScorer::score(&request.list_quiz_questions, &request.answers);
        log::info!(
            "Evaluated {} answers across {} topics",
            request.answers.len(),
            understanding.len()
        );
        Ok(understanding)
    }

    /// Scores answers submitted before the quiz existed. Answers pointing
    /// past the end of the quiz are dropped with a warning.
    pub fn score_submission(&self, quiz: &Quiz, answers: &[QuizAnswer]) -> UnderstandingScore {
        let ignored = answers
            .iter()
            .filter(|answer| answer.question_index >= quiz.len())
            .count();
        if ignored > 0 {
            log::warn!(
                "Ignoring {} answer(s) outside a quiz of {} questions",
                ignored,
                quiz.len()
            );
        }

        UnderstandingScorer::score(&quiz.list_quiz_questions, answers)
    }

    pub async fn curate_topics(&self, request: &CurateTopicsRequest) -> AppResult<TopicOutline> {
        request.validate()?;
        let subject = request.request.subject.trim();

        let curated: TopicOutline = self
            .run_agent(
                &CURATED_TOPIC_OUTLINE_AGENT,
                PromptBuilder::curation_prompt(subject, &request.understanding),
                subject,
            )
            .await?;

        if curated.is_empty() {
            return Err(AppError::MalformedUpstreamResponse(format!(
                "{} returned no topics",
                CURATED_TOPIC_OUTLINE_AGENT.name
            )));
        }

        log::info!(
            "Curated {} topics for '{}' from {} scores",
            curated.len(),
            subject,
            request.understanding.len()
        );
        Ok(curated)
    }

    pub async fn generate_content(
        &self,
        outline: &TopicOutline,
        scores: Option<&UnderstandingScore>,
    ) -> AppResult<StudyContent> {
        outline.validate()?;

        let content: StudyContent = self
            .run_agent(
                &CONTENT_WRITER_AGENT,
                PromptBuilder::content_prompt(outline, scores),
                &outline.search_query(),
            )
            .await?;

        log::info!("Generated content for {} topics", content.len());
        Ok(content)
    }

    pub async fn generate_single_topic(&self, topic: &Topic) -> AppResult<ContentMain> {
        if topic.topic.trim().is_empty() {
            return Err(AppError::ValidationError(
                "topic.topic: must not be blank".to_string(),
            ));
        }

        let content: ContentMain = self
            .run_agent(
                &SINGLE_TOPIC_WRITER_AGENT,
                PromptBuilder::single_topic_prompt(topic),
                &topic.topic,
            )
            .await?;

        log::info!(
            "Generated content for '{}' with {} subtopics",
            content.topic_title,
            content.subtopics.len()
        );
        Ok(content)
    }
}
