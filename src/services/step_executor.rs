use crate::{
    errors::AppResult,
    models::dto::request::{CurateTopicsRequest, TopicRequest},
    services::{
        pipeline_service::{required, PipelineContext},
        study_plan_service::StudyPlanService,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    GenerateTopics,
    GenerateQuiz,
    EvaluateQuiz,
    CurateTopics,
    GenerateContent,
}

impl StepKind {
    pub fn from_step_name(name: &str) -> Option<Self> {
        match name {
            "generate_topics" => Some(StepKind::GenerateTopics),
            "generate_quiz" => Some(StepKind::GenerateQuiz),
            "evaluate_quiz" => Some(StepKind::EvaluateQuiz),
            "curate_topics" => Some(StepKind::CurateTopics),
            "generate_content" => Some(StepKind::GenerateContent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::GenerateTopics => "generate_topics",
            StepKind::GenerateQuiz => "generate_quiz",
            StepKind::EvaluateQuiz => "evaluate_quiz",
            StepKind::CurateTopics => "curate_topics",
            StepKind::GenerateContent => "generate_content",
        }
    }
}

pub struct StepHandler;

impl StepHandler {
    pub async fn execute(
        kind: StepKind,
        context: &mut PipelineContext,
        service: &StudyPlanService,
    ) -> AppResult<()> {
        log::info!("Executing {} step", kind.as_str());

        match kind {
            StepKind::GenerateTopics => Self::handle_generate_topics(context, service).await,
            StepKind::GenerateQuiz => Self::handle_generate_quiz(context, service).await,
            StepKind::EvaluateQuiz => Self::handle_evaluate_quiz(context, service),
            StepKind::CurateTopics => Self::handle_curate_topics(context, service).await,
            StepKind::GenerateContent => Self::handle_generate_content(context, service).await,
        }
    }

    async fn handle_generate_topics(
        context: &mut PipelineContext,
        service: &StudyPlanService,
    ) -> AppResult<()> {
        let request = TopicRequest {
            subject: context.subject.clone(),
        };
        context.topics = Some(service.generate_topics(&request).await?);
        Ok(())
    }

    async fn handle_generate_quiz(
        context: &mut PipelineContext,
        service: &StudyPlanService,
    ) -> AppResult<()> {
        let topics = required(&context.topics, "topics")?;
        let quiz = service.generate_quiz(topics).await?;
        context.quiz = Some(quiz);
        Ok(())
    }

    fn handle_evaluate_quiz(
        context: &mut PipelineContext,
        service: &StudyPlanService,
    ) -> AppResult<()> {
        let quiz = required(&context.quiz, "quiz")?;
        let understanding = service.score_submission(quiz, &context.answers);
        context.understanding = Some(understanding);
        Ok(())
    }

    async fn handle_curate_topics(
        context: &mut PipelineContext,
        service: &StudyPlanService,
    ) -> AppResult<()> {
        let request = CurateTopicsRequest {
            request: TopicRequest {
                subject: context.subject.clone(),
            },
            understanding: required(&context.understanding, "understanding")?.clone(),
        };
        context.curated_topics = Some(service.curate_topics(&request).await?);
        Ok(())
    }

    async fn handle_generate_content(
        context: &mut PipelineContext,
        service: &StudyPlanService,
    ) -> AppResult<()> {
        let topics = required(&context.curated_topics, "curated topics")?;
        let content = service
            .generate_content(topics, context.understanding.as_ref())
            .await?;
        context.content = Some(content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_kind_round_trips_through_name() {
        for kind in [
            StepKind::GenerateTopics,
            StepKind::GenerateQuiz,
            StepKind::EvaluateQuiz,
            StepKind::CurateTopics,
            StepKind::GenerateContent,
        ] {
            assert_eq!(StepKind::from_step_name(kind.as_str()), Some(kind));
        }
        assert_eq!(StepKind::from_step_name("finalize_quiz"), None);
    }
}
