use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::services::agent_runner::{AgentRequest, AgentRunner};

/// Runs agents as single chat completions constrained by a JSON schema
/// response format.
pub struct OpenAiAgentRunner {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiAgentRunner {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(&config.openai_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }

    fn request_body(&self, request: &AgentRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.instructions},
                {"role": "user", "content": request.input},
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.output_name,
                    "schema": request.output_schema,
                    "strict": false,
                },
            },
        })
    }
}

#[async_trait]
impl AgentRunner for OpenAiAgentRunner {
    async fn run(&self, request: AgentRequest) -> AppResult<Value> {
        log::info!(
            "Running agent {} with model {}",
            request.agent_name,
            self.model
        );

        let response: Value = self
            .client
            .chat()
            .create_byot(self.request_body(&request))
            .await?;

        extract_structured_output(&request.agent_name, &response)
    }
}

/// Pulls the JSON document out of the first choice of a chat completion.
fn extract_structured_output(agent_name: &str, response: &Value) -> AppResult<Value> {
    let message = response.pointer("/choices/0/message").ok_or_else(|| {
        AppError::MalformedUpstreamResponse(format!("{} returned no choices", agent_name))
    })?;

    if let Some(refusal) = message.get("refusal").and_then(Value::as_str) {
        return Err(AppError::UpstreamError(format!(
            "{} refused the request: {}",
            agent_name, refusal
        )));
    }

    let content = message
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::MalformedUpstreamResponse(format!("{} returned an empty message", agent_name))
        })?;

    serde_json::from_str(content).map_err(|e| {
        AppError::MalformedUpstreamResponse(format!(
            "{} returned content that is not JSON: {}",
            agent_name, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::TopicOutline;
    use crate::services::agent_definitions::TOPIC_OUTLINE_AGENT;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner_for(server: &MockServer) -> OpenAiAgentRunner {
        let config = Config {
            openai_api_base: format!("{}/v1", server.uri()),
            ..Config::test_config()
        };
        OpenAiAgentRunner::new(&config)
    }

    fn outline_request() -> AgentRequest {
        AgentRequest::for_output::<TopicOutline>(&TOPIC_OUTLINE_AGENT, "Biology".to_string())
            .expect("schema should build")
    }

    fn completion(message: Value) -> Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1,
            "model": "gpt-test",
            "choices": [{"index": 0, "message": message, "finish_reason": "stop"}]
        })
    }

    #[tokio::test]
    async fn returns_parsed_structured_output() {
        let server = MockServer::start().await;
        let content = json!({
            "list_of_topics": [
                {"topic": "Cells", "description": "Units of life", "subtopics": ["a", "b", "c"]}
            ]
        })
        .to_string();

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-test",
                "response_format": {"type": "json_schema", "json_schema": {"name": "ListOfTopics"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!({
                "role": "assistant",
                "content": content,
            }))))
            .mount(&server)
            .await;

        let output = runner_for(&server)
            .run(outline_request())
            .await
            .expect("completion should succeed");

        assert_eq!(output["list_of_topics"][0]["topic"], "Cells");
    }

    #[tokio::test]
    async fn non_json_content_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!({
                "role": "assistant",
                "content": "Here are your topics!",
            }))))
            .mount(&server)
            .await;

        let err = runner_for(&server)
            .run(outline_request())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MalformedUpstreamResponse(_)));
    }

    #[tokio::test]
    async fn api_error_maps_to_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "message": "Invalid schema",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": null
                }
            })))
            .mount(&server)
            .await;

        let err = runner_for(&server)
            .run(outline_request())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UpstreamError(_)));
    }

    #[test]
    fn refusal_is_an_upstream_error() {
        let response = completion(json!({
            "role": "assistant",
            "content": null,
            "refusal": "I can't help with that."
        }));

        let err = extract_structured_output("quiz", &response).unwrap_err();

        assert!(matches!(err, AppError::UpstreamError(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn missing_choices_is_malformed() {
        let err = extract_structured_output("quiz", &json!({"choices": []})).unwrap_err();
        assert!(matches!(err, AppError::MalformedUpstreamResponse(_)));
    }
}
