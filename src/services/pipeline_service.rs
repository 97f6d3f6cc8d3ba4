use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Quiz, QuizAnswer, StudyContent, TopicOutline, UnderstandingScore};
use crate::models::dto::request::CompleteFlowRequest;
use crate::models::dto::response::CompleteFlowResponse;
use crate::services::pipeline_steps::study_plan_steps::create_study_plan_steps;
use crate::services::step_executor::{StepHandler, StepKind};
use crate::services::study_plan_service::StudyPlanService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Pending => write!(f, "pending"),
            RunStatus::Running => write!(f, "running"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A step of the study plan pipeline, executed in sequence
#[derive(Debug, Clone)]
pub struct PipelineStep {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl PipelineStep {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            timeout_seconds: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }
}

/// Outcome of one step, returned to the client with the run
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&PipelineStep> for StepRecord {
    fn from(step: &PipelineStep) -> Self {
        Self {
            step_id: step.id.clone(),
            name: step.name.clone(),
            description: step.description.clone(),
            status: RunStatus::Pending,
            started_at: None,
            completed_at: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub status: RunStatus,
    pub steps: Vec<PipelineStep>,
    pub records: Vec<StepRecord>,
    pub current_step_index: usize,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl PipelineRun {
    pub fn new(steps: Vec<PipelineStep>) -> Self {
        let records = steps.iter().map(StepRecord::from).collect();
        Self {
            run_id: Uuid::new_v4(),
            status: RunStatus::Pending,
            steps,
            records,
            current_step_index: 0,
            error_message: None,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    pub fn get_current_step(&self) -> Option<&PipelineStep> {
        self.steps.get(self.current_step_index)
    }

    pub fn is_complete(&self) -> bool {
        self.current_step_index >= self.steps.len()
    }

    fn start(&mut self) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
    }

    fn start_step(&mut self) {
        if let Some(record) = self.records.get_mut(self.current_step_index) {
            record.status = RunStatus::Running;
            record.started_at = Some(Utc::now());
        }
    }

    fn complete_step(&mut self) {
        if let Some(record) = self.records.get_mut(self.current_step_index) {
            record.status = RunStatus::Completed;
            record.completed_at = Some(Utc::now());
        }

        self.current_step_index += 1;
        if self.is_complete() {
            self.status = RunStatus::Completed;
            self.completed_at = Some(Utc::now());
        }
    }

    fn fail_step(&mut self, error: &AppError) {
        let message = error.to_string();
        if let Some(record) = self.records.get_mut(self.current_step_index) {
            record.status = RunStatus::Failed;
            record.completed_at = Some(Utc::now());
            record.error = Some(message.clone());
        }

        self.status = RunStatus::Failed;
        self.error_message = Some(message);
        self.completed_at = Some(Utc::now());
    }
}

/// Inputs and intermediate results of a run. Each step reads what earlier
/// steps produced and fills in its own output.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    pub subject: String,
    pub answers: Vec<QuizAnswer>,
    pub topics: Option<TopicOutline>,
    pub quiz: Option<Quiz>,
    pub understanding: Option<UnderstandingScore>,
    pub curated_topics: Option<TopicOutline>,
    pub content: Option<StudyContent>,
}

impl PipelineContext {
    pub fn new(subject: impl Into<String>, answers: Vec<QuizAnswer>) -> Self {
        Self {
            subject: subject.into(),
            answers,
            ..Self::default()
        }
    }
}

/// Pulls a prerequisite out of the run context.
pub(crate) fn required<'a, T>(value: &'a Option<T>, what: &str) -> AppResult<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| AppError::InternalError(format!("{} missing from pipeline context", what)))
}

/// Runs topics, quiz, scoring, curation and content generation back to back.
pub struct StudyPlanPipeline {
    service: Arc<StudyPlanService>,
}

impl StudyPlanPipeline {
    pub fn new(service: Arc<StudyPlanService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, request: &CompleteFlowRequest) -> AppResult<CompleteFlowResponse> {
        request.validate()?;

        let mut run = PipelineRun::new(create_study_plan_steps());
        let mut context = PipelineContext::new(
            request.request.subject.trim(),
            request.quiz_submission.answers.clone(),
        );

        self.execute(&mut run, &mut context).await?;

        Ok(CompleteFlowResponse {
            run_id: run.run_id,
            topics: required(&context.topics, "topics")?.clone(),
            quiz: required(&context.quiz, "quiz")?.clone(),
            understanding: required(&context.understanding, "understanding")?.clone(),
            curated_topics: required(&context.curated_topics, "curated topics")?.clone(),
            content: required(&context.content, "content")?.clone(),
            steps: run.records,
        })
    }

    /// Executes the remaining steps of `run` in order, stopping at the first failure.
    pub async fn execute(
        &self,
        run: &mut PipelineRun,
        context: &mut PipelineContext,
    ) -> AppResult<()> {
        if run.status != RunStatus::Pending {
            return Err(AppError::InternalError(format!(
                "Run {} is already {}",
                run.run_id, run.status
            )));
        }

        run.start();
        log::info!(
            "Starting study plan run {} with {} steps",
            run.run_id,
            run.steps.len()
        );

        while let Some(step) = run.get_current_step().cloned() {
            run.start_step();

            let result = match StepKind::from_step_name(&step.name) {
                Some(kind) => self.execute_step(kind, &step, context).await,
                None => Err(AppError::InternalError(format!(
                    "Unknown pipeline step '{}'",
                    step.name
                ))),
            };

            if let Err(err) = result {
                log::error!(
                    "Run {} failed at step {}: {}",
                    run.run_id,
                    step.name,
                    err
                );
                run.fail_step(&err);
                return Err(err);
            }

            run.complete_step();
        }

        log::info!("Study plan run {} completed", run.run_id);
        Ok(())
    }

    async fn execute_step(
        &self,
        kind: StepKind,
        step: &PipelineStep,
        context: &mut PipelineContext,
    ) -> AppResult<()> {
        let handler = StepHandler::execute(kind, context, &self.service);

        match step.timeout_seconds {
            Some(seconds) => tokio::time::timeout(Duration::from_secs(seconds), handler)
                .await
                .map_err(|_| AppError::UpstreamTimeout(seconds))?,
            None => handler.await,
        }
    }
}
