use std::fmt::Write as _;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STUDY_PLAN_TITLE: &str = "Study Plan";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ContentSub {
    pub sub_topic_title: String,
    pub sub_content_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ContentMain {
    pub topic_title: String,
    pub main_description: String,
    pub subtopics: Vec<ContentSub>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct StudyContent {
    pub topic: Vec<ContentMain>,
}

impl StudyContent {
    pub fn len(&self) -> usize {
        self.topic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topic.is_empty()
    }

    /// Renders the study plan as a Markdown document.
    pub fn to_markdown(&self, title: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}", title.trim());

        for main in &self.topic {
            let _ = write!(out, "\n## {}\n\n{}\n", main.topic_title, main.main_description.trim());
            for sub in &main.subtopics {
                let _ = write!(
                    out,
                    "\n### {}\n\n{}\n",
                    sub.sub_topic_title,
                    sub.sub_content_text.trim()
                );
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_contains_heading_hierarchy() {
        let content = StudyContent {
            topic: vec![ContentMain {
                topic_title: "Photosynthesis".to_string(),
                main_description: "How plants make food.".to_string(),
                subtopics: vec![ContentSub {
                    sub_topic_title: "Light reactions".to_string(),
                    sub_content_text: "Occur in the thylakoid.".to_string(),
                }],
            }],
        };

        let markdown = content.to_markdown(DEFAULT_STUDY_PLAN_TITLE);
        assert_eq!(
            markdown,
            "# Study Plan\n\n## Photosynthesis\n\nHow plants make food.\n\n### Light reactions\n\nOccur in the thylakoid.\n"
        );
    }

    #[test]
    fn empty_content_renders_title_only() {
        let content = StudyContent { topic: vec![] };
        assert_eq!(content.to_markdown("Finals"), "# Finals\n");
        assert!(content.is_empty());
    }
}
