use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Topic {
    pub topic: String,
    pub description: String,
    pub subtopics: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
pub struct TopicOutline {
    #[validate(length(min = 1, message = "list_of_topics must contain at least one topic"))]
    pub list_of_topics: Vec<Topic>,
}

impl TopicOutline {
    pub fn len(&self) -> usize {
        self.list_of_topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list_of_topics.is_empty()
    }

    /// Topic names joined into a single retrieval query.
    pub fn search_query(&self) -> String {
        self.list_of_topics
            .iter()
            .map(|t| t.topic.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
