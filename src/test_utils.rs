use crate::models::domain::{
    ChoiceLabel, ContentMain, ContentSub, Quiz, QuizAnswer, QuizQuestion, StudyContent, Topic,
    TopicOutline, UnderstandingScore,
};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub fn topic(name: &str) -> Topic {
        Topic {
            topic: name.to_string(),
            description: format!("Core ideas of {}", name),
            subtopics: vec![
                format!("{} basics", name),
                format!("{} methods", name),
                format!("{} applications", name),
            ],
        }
    }

    /// Two topics: Algebra then Geometry
    pub fn outline() -> TopicOutline {
        TopicOutline {
            list_of_topics: vec![topic("Algebra"), topic("Geometry")],
        }
    }

    pub fn question(topic: &str, correct: ChoiceLabel) -> QuizQuestion {
        QuizQuestion {
            topic: topic.to_string(),
            quiz_question: format!("Which statement about {} is true?", topic),
            choice_a: "first".to_string(),
            choice_b: "second".to_string(),
            choice_c: "third".to_string(),
            choice_d: "fourth".to_string(),
            correct_answer: correct,
        }
    }

    /// Algebra (a), Algebra (b), Geometry (c)
    pub fn quiz() -> Quiz {
        Quiz {
            list_quiz_questions: vec![
                question("Algebra", ChoiceLabel::A),
                question("Algebra", ChoiceLabel::B),
                question("Geometry", ChoiceLabel::C),
            ],
        }
    }

    pub fn answers(pairs: &[(usize, &str)]) -> Vec<QuizAnswer> {
        pairs
            .iter()
            .map(|(question_index, answer)| QuizAnswer {
                question_index: *question_index,
                answer: answer.to_string(),
            })
            .collect()
    }

    /// Algebra 50%, Geometry 100%
    pub fn understanding() -> UnderstandingScore {
        UnderstandingScore {
            scores: [("Algebra".to_string(), 50.0), ("Geometry".to_string(), 100.0)]
                .into_iter()
                .collect(),
        }
    }

    pub fn study_content() -> StudyContent {
        StudyContent {
            topic: vec![ContentMain {
                topic_title: "Algebra".to_string(),
                main_description: "Working with symbols.".to_string(),
                subtopics: vec![ContentSub {
                    sub_topic_title: "Linear equations".to_string(),
                    sub_content_text: "Solve for x.".to_string(),
                }],
            }],
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_outline() {
        let outline = outline();
        assert_eq!(outline.len(), 2);
        assert_eq!(outline.list_of_topics[0].subtopics.len(), 3);
    }

    #[test]
    fn test_fixtures_quiz_topics_match_outline() {
        let outline = outline();
        let quiz = quiz();
        assert!(quiz
            .list_quiz_questions
            .iter()
            .all(|q| outline.list_of_topics.iter().any(|t| t.topic == q.topic)));
    }

    #[test]
    fn test_fixtures_understanding_order() {
        let topics: Vec<String> = understanding().scores.keys().cloned().collect();
        assert_eq!(topics, vec!["Algebra", "Geometry"]);
    }
}
