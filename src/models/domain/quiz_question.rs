use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of one of the four choices of a quiz question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceLabel {
    A,
    B,
    C,
    D,
}

impl ChoiceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceLabel::A => "a",
            ChoiceLabel::B => "b",
            ChoiceLabel::C => "c",
            ChoiceLabel::D => "d",
        }
    }

    /// Case-insensitive comparison against a submitted answer label.
    pub fn matches(&self, answer: &str) -> bool {
        answer.eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChoiceLabel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(ChoiceLabel::A),
            "b" => Ok(ChoiceLabel::B),
            "c" => Ok(ChoiceLabel::C),
            "d" => Ok(ChoiceLabel::D),
            other => Err(format!(
                "invalid choice label '{}', expected one of a, b, c, d",
                other
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ChoiceLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct QuizQuestion {
    pub topic: String,
    pub quiz_question: String,
    pub choice_a: String,
    pub choice_b: String,
    pub choice_c: String,
    pub choice_d: String,
    pub correct_answer: ChoiceLabel,
}

impl QuizQuestion {
    pub fn choice(&self, label: ChoiceLabel) -> &str {
        match label {
            ChoiceLabel::A => &self.choice_a,
            ChoiceLabel::B => &self.choice_b,
            ChoiceLabel::C => &self.choice_c,
            ChoiceLabel::D => &self.choice_d,
        }
    }

    pub fn correct_choice_text(&self) -> &str {
        self.choice(self.correct_answer)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Quiz {
    pub list_quiz_questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.list_quiz_questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list_quiz_questions.is_empty()
    }
}
