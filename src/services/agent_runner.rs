use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// A named agent: its standing instructions and the shape of what it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentDefinition {
    pub name: &'static str,
    pub instructions: &'static str,
    pub output_name: &'static str,
    /// Whether reference excerpts from uploaded documents are appended to the input.
    pub grounded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentRequest {
    pub agent_name: String,
    pub instructions: String,
    pub input: String,
    pub output_name: String,
    pub output_schema: Value,
}

impl AgentRequest {
    pub fn for_output<T: JsonSchema>(agent: &AgentDefinition, input: String) -> AppResult<Self> {
        let mut output_schema = serde_json::to_value(schemars::schema_for!(T)).map_err(|e| {
            AppError::InternalError(format!(
                "Failed to build output schema for {}: {}",
                agent.name, e
            ))
        })?;

        if let Value::Object(map) = &mut output_schema {
            map.remove("$schema");
        }

        Ok(Self {
            agent_name: agent.name.to_string(),
            instructions: agent.instructions.to_string(),
            input,
            output_name: agent.output_name.to_string(),
            output_schema,
        })
    }
}

/// Runs an agent: given instructions, an input and an output schema, returns
/// the structured JSON the agent produced.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentRunner: Send + Sync {
    async fn run(&self, request: AgentRequest) -> AppResult<Value>;
}

/// Wraps an [`AgentRunner`] with a per-attempt timeout, bounded retries and
/// decoding into a concrete output type.
#[derive(Clone)]
pub struct AgentExecutor {
    runner: Arc<dyn AgentRunner>,
    timeout: Duration,
    max_retries: u32,
    retry_backoff: Duration,
}

impl AgentExecutor {
    pub fn new(runner: Arc<dyn AgentRunner>, timeout: Duration) -> Self {
        Self {
            runner,
            timeout,
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    pub async fn run<T>(&self, agent: &AgentDefinition, input: String) -> AppResult<T>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let request = AgentRequest::for_output::<T>(agent, input)?;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self.run_once::<T>(request.clone()).await {
                Ok(output) => return Ok(output),
                Err(err) if err.is_retryable() && attempt <= self.max_retries => {
                    log::warn!(
                        "Agent {} attempt {} failed, retrying: {}",
                        agent.name,
                        attempt,
                        err
                    );
                    tokio::time::sleep(self.retry_backoff).await;
                }
                Err(err) => {
                    log::error!(
                        "Agent {} failed after {} attempt(s): {}",
                        agent.name,
                        attempt,
                        err
                    );
                    return Err(err);
                }
            }
        }
    }

    async fn run_once<T: DeserializeOwned>(&self, request: AgentRequest) -> AppResult<T> {
        let agent_name = request.agent_name.clone();

        let value = tokio::time::timeout(self.timeout, self.runner.run(request))
            .await
            .map_err(|_| AppError::UpstreamTimeout(self.timeout.as_secs()))??;

        serde_json::from_value(value).map_err(|e| {
            AppError::MalformedUpstreamResponse(format!(
                "{} returned output that does not match its schema: {}",
                agent_name, e
            ))
        })
    }
}
