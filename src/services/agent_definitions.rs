use crate::constants::prompts::{
    CONTENT_WRITER_PROMPT, CURATED_TOPIC_OUTLINE_PROMPT, QUIZ_GENERATOR_PROMPT,
    SINGLE_TOPIC_WRITER_PROMPT, TOPIC_OUTLINE_PROMPT,
};
use crate::services::agent_runner::AgentDefinition;

pub const TOPIC_OUTLINE_AGENT: AgentDefinition = AgentDefinition {
    name: "main_topic_outline_agent",
    instructions: TOPIC_OUTLINE_PROMPT,
    output_name: "ListOfTopics",
    grounded: true,
};

pub const CURATED_TOPIC_OUTLINE_AGENT: AgentDefinition = AgentDefinition {
    name: "curated_topic_outline_agent",
    instructions: CURATED_TOPIC_OUTLINE_PROMPT,
    output_name: "ListOfTopics",
    grounded: false,
};

pub const QUIZ_AGENT: AgentDefinition = AgentDefinition {
    name: "open_quiz_agent",
    instructions: QUIZ_GENERATOR_PROMPT,
    output_name: "ListOfQuizQuestions",
    grounded: true,
};

pub const CONTENT_WRITER_AGENT: AgentDefinition = AgentDefinition {
    name: "content_writer_agent",
    instructions: CONTENT_WRITER_PROMPT,
    output_name: "ContentTopic",
    grounded: true,
};

pub const SINGLE_TOPIC_WRITER_AGENT: AgentDefinition = AgentDefinition {
    name: "single_topic_content_agent",
    instructions: SINGLE_TOPIC_WRITER_PROMPT,
    output_name: "ContentMain",
    grounded: true,
};
