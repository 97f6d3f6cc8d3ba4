pub mod agent_definitions;
pub mod agent_runner;
pub mod document_service;
pub mod openai_agent_runner;
pub mod pipeline_service;
pub mod pipeline_steps;
pub mod prompt_builder;
pub mod step_executor;
pub mod study_plan_service;
pub mod understanding_service;
pub mod vector_store_client;
