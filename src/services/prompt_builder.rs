use crate::models::domain::{SearchHit, Topic, TopicOutline, UnderstandingScore};

/// Renders domain values into the plain-text inputs the agents receive.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn format_topics(topics: &[Topic]) -> String {
        topics
            .iter()
            .enumerate()
            .map(|(i, topic)| {
                format!(
                    "{}. {}\n   Description: {}\n   Subtopics: {}",
                    i + 1,
                    topic.topic,
                    topic.description,
                    topic.subtopics.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn quiz_prompt(outline: &TopicOutline) -> String {
        format!(
            "Here are the topics:\n{}",
            Self::format_topics(&outline.list_of_topics)
        )
    }

    pub fn curation_prompt(subject: &str, understanding: &UnderstandingScore) -> String {
        format!(
            "Here is the main topic:\n{}\nHere is the understanding of the topic:\n{}",
            subject,
            understanding.summary_lines()
        )
    }

    pub fn content_prompt(outline: &TopicOutline, scores: Option<&UnderstandingScore>) -> String {
        let mut prompt = format!(
            "Here are the topics to write content for:\n{}\nYou need to output the main content, its description and the subtopics with the content for each subtopic.",
            Self::format_topics(&outline.list_of_topics)
        );

        if let Some(scores) = scores.filter(|s| !s.is_empty()) {
            prompt.push_str("\n\nUnderstanding by Topic:\n");
            prompt.push_str(&scores.summary_lines());
        }

        prompt
    }

    pub fn single_topic_prompt(topic: &Topic) -> String {
        Self::format_topics(std::slice::from_ref(topic))
    }

    /// Appends retrieved excerpts to an agent input. Returns the input
    /// unchanged when there is nothing to add.
    pub fn with_reference_context(input: String, hits: &[SearchHit]) -> String {
        if hits.is_empty() {
            return input;
        }

        let excerpts = hits
            .iter()
            .map(|hit| format!("[{}]\n{}", hit.filename, hit.text.trim()))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "{}\n\nReference material from the learner's uploaded documents:\n{}",
            input, excerpts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn topic(name: &str) -> Topic {
        Topic {
            topic: name.to_string(),
            description: format!("About {}", name),
            subtopics: vec!["one".to_string(), "two".to_string(), "three".to_string()],
        }
    }

    fn scores() -> UnderstandingScore {
        let mut scores = IndexMap::new();
        scores.insert("Algebra".to_string(), 50.0);
        scores.insert("Geometry".to_string(), 100.0);
        UnderstandingScore { scores }
    }

    #[test]
    fn formats_numbered_topics() {
        let rendered = PromptBuilder::format_topics(&[topic("Algebra"), topic("Geometry")]);

        assert_eq!(
            rendered,
            "1. Algebra\n   Description: About Algebra\n   Subtopics: one, two, three\n\
             2. Geometry\n   Description: About Geometry\n   Subtopics: one, two, three"
        );
    }

    #[test]
    fn quiz_prompt_lists_topics() {
        let outline = TopicOutline {
            list_of_topics: vec![topic("Algebra")],
        };
        assert!(PromptBuilder::quiz_prompt(&outline).starts_with("Here are the topics:\n1. Algebra"));
    }

    #[test]
    fn curation_prompt_renders_scores_in_order() {
        let prompt = PromptBuilder::curation_prompt("Maths", &scores());

        assert_eq!(
            prompt,
            "Here is the main topic:\nMaths\nHere is the understanding of the topic:\nAlgebra: 50.0%\nGeometry: 100.0%"
        );
    }

    #[test]
    fn content_prompt_includes_scores_only_when_given() {
        let outline = TopicOutline {
            list_of_topics: vec![topic("Algebra")],
        };

        let without = PromptBuilder::content_prompt(&outline, None);
        let with = PromptBuilder::content_prompt(&outline, Some(&scores()));

        assert!(!without.contains("Understanding by Topic"));
        assert!(with.ends_with("Understanding by Topic:\nAlgebra: 50.0%\nGeometry: 100.0%"));
    }

    #[test]
    fn reference_context_is_appended() {
        let hits = vec![SearchHit {
            file_id: "file-1".to_string(),
            filename: "notes.txt".to_string(),
            score: 0.8,
            text: " Cells divide by mitosis. ".to_string(),
        }];

        let grounded = PromptBuilder::with_reference_context("Biology".to_string(), &hits);

        assert_eq!(
            grounded,
            "Biology\n\nReference material from the learner's uploaded documents:\n[notes.txt]\nCells divide by mitosis."
        );
        assert_eq!(
            PromptBuilder::with_reference_context("Biology".to_string(), &[]),
            "Biology"
        );
    }
}
