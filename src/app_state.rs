use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        agent_runner::{AgentExecutor, AgentRunner},
        document_service::DocumentService,
        openai_agent_runner::OpenAiAgentRunner,
        pipeline_service::StudyPlanPipeline,
        study_plan_service::StudyPlanService,
        vector_store_client::{OpenAiVectorStoreClient, VectorStoreClient},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub study_plan_service: Arc<StudyPlanService>,
    pub document_service: Arc<DocumentService>,
    pub pipeline: Arc<StudyPlanPipeline>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let runner = Arc::new(OpenAiAgentRunner::new(&config));
        let vector_store = Arc::new(OpenAiVectorStoreClient::new(&config)?);

        Ok(Self::from_parts(config, runner, vector_store))
    }

    /// Wires the services around the given upstream clients.
    pub fn from_parts(
        config: Config,
        runner: Arc<dyn AgentRunner>,
        vector_store: Arc<dyn VectorStoreClient>,
    ) -> Self {
        let executor = AgentExecutor::new(runner, config.agent_timeout())
            .with_max_retries(config.agent_max_retries);

        let document_service = Arc::new(DocumentService::new(vector_store, &config));
        let study_plan_service = Arc::new(StudyPlanService::new(
            executor,
            Arc::clone(&document_service),
        ));
        let pipeline = Arc::new(StudyPlanPipeline::new(Arc::clone(&study_plan_service)));

        Self {
            study_plan_service,
            document_service,
            pipeline,
            config: Arc::new(config),
        }
    }
}
