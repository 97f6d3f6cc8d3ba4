use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAnswer {
    pub question_index: usize,
    pub answer: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizSubmission {
    pub answers: Vec<QuizAnswer>,
}

/// Percentage of correctly answered questions per topic, keyed by the exact
/// topic label and kept in order of first appearance in the quiz.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct UnderstandingScore {
    pub scores: IndexMap<String, f64>,
}

impl UnderstandingScore {
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn get(&self, topic: &str) -> Option<f64> {
        self.scores.get(topic).copied()
    }

    /// One `"{topic}: {score:.1}%"` line per topic, in mapping order.
    pub fn summary_lines(&self) -> String {
        self.scores
            .iter()
            .map(|(topic, score)| format!("{}: {:.1}%", topic, score))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
