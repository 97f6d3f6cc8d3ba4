use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{QuizAnswer, QuizQuestion, UnderstandingScore};

#[derive(Debug, Default, Clone, Copy)]
struct TopicTally {
    correct: u32,
    total: u32,
}

impl TopicTally {
    fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.correct as f64 / self.total as f64) * 100.0
    }
}

pub struct UnderstandingScorer;

impl UnderstandingScorer {
    /// Aggregates per-question correctness into a percentage per topic.
    ///
    /// Questions are identified by their 0-based position. Topics are grouped
    /// by exact label and reported in order of first appearance. A question
    /// without an answer counts as wrong; an answer whose index matches no
    /// question is ignored. If several answers share an index, the first one
    /// is used.
    pub fn score(questions: &[QuizQuestion], answers: &[QuizAnswer]) -> UnderstandingScore {
        let mut chosen: HashMap<usize, &str> = HashMap::with_capacity(answers.len());
        for answer in answers {
            chosen
                .entry(answer.question_index)
                .or_insert(answer.answer.as_str());
        }

        let mut tallies: IndexMap<&str, TopicTally> = IndexMap::new();
        for (index, question) in questions.iter().enumerate() {
            let tally = tallies.entry(question.topic.as_str()).or_default();
            tally.total += 1;

            let is_correct = chosen
                .get(&index)
                .is_some_and(|answer| question.correct_answer.matches(answer));
            if is_correct {
                tally.correct += 1;
            }
        }

        UnderstandingScore {
            scores: tallies
                .into_iter()
                .map(|(topic, tally)| (topic.to_string(), tally.percentage()))
                .collect(),
        }
    }

    /// Rejects answers that point outside the quiz or repeat a question index.
    pub fn validate_submission(question_count: usize, answers: &[QuizAnswer]) -> AppResult<()> {
        let mut seen = HashSet::with_capacity(answers.len());

        for (position, answer) in answers.iter().enumerate() {
            if answer.question_index >= question_count {
                return Err(AppError::ValidationError(format!(
                    "answers[{}].question_index: {} is out of range for a quiz of {} questions",
                    position, answer.question_index, question_count
                )));
            }

            if !seen.insert(answer.question_index) {
                return Err(AppError::ValidationError(format!(
                    "answers[{}].question_index: duplicate answer for question {}",
                    position, answer.question_index
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::ChoiceLabel;

    fn question(topic: &str, correct: ChoiceLabel) -> QuizQuestion {
        QuizQuestion {
            topic: topic.to_string(),
            quiz_question: format!("A question about {}", topic),
            choice_a: "first".to_string(),
            choice_b: "second".to_string(),
            choice_c: "third".to_string(),
            choice_d: "fourth".to_string(),
            correct_answer: correct,
        }
    }

    fn answer(question_index: usize, label: &str) -> QuizAnswer {
        QuizAnswer {
            question_index,
            answer: label.to_string(),
        }
    }

    fn algebra_geometry_quiz() -> Vec<QuizQuestion> {
        vec![
            question("Algebra", ChoiceLabel::A),
            question("Algebra", ChoiceLabel::B),
            question("Geometry", ChoiceLabel::C),
        ]
    }

    #[test]
    fn scores_mixed_topics() {
        let answers = vec![answer(0, "a"), answer(1, "c"), answer(2, "c")];

        let result = UnderstandingScorer::score(&algebra_geometry_quiz(), &answers);

        assert_eq!(result.len(), 2);
        assert_eq!(result.get("Algebra"), Some(50.0));
        assert_eq!(result.get("Geometry"), Some(100.0));
    }

    #[test]
    fn empty_quiz_yields_empty_scores() {
        let result = UnderstandingScorer::score(&[], &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn unanswered_single_question_scores_zero() {
        let result = UnderstandingScorer::score(&[question("X", ChoiceLabel::D)], &[]);
        assert_eq!(result.get("X"), Some(0.0));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn all_correct_answers_score_one_hundred() {
        let quiz = algebra_geometry_quiz();
        let answers = vec![answer(0, "A"), answer(1, "b"), answer(2, "C")];

        let result = UnderstandingScorer::score(&quiz, &answers);

        assert!(result.scores.values().all(|score| *score == 100.0));
    }

    #[test]
    fn no_answers_score_zero_for_every_topic() {
        let result = UnderstandingScorer::score(&algebra_geometry_quiz(), &[]);
        assert!(result.scores.values().all(|score| *score == 0.0));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn unanswered_counts_like_wrong_answer() {
        let quiz = algebra_geometry_quiz();

        let unanswered = UnderstandingScorer::score(&quiz, &[answer(0, "a")]);
        let wrong = UnderstandingScorer::score(&quiz, &[answer(0, "a"), answer(1, "d")]);

        assert_eq!(unanswered, wrong);
        assert_eq!(unanswered.get("Algebra"), Some(50.0));
    }

    #[test]
    fn answer_case_does_not_affect_correctness() {
        let quiz = vec![question("Chemistry", ChoiceLabel::A)];

        let upper = UnderstandingScorer::score(&quiz, &[answer(0, "A")]);
        let lower = UnderstandingScorer::score(&quiz, &[answer(0, "a")]);

        assert_eq!(upper, lower);
        assert_eq!(upper.get("Chemistry"), Some(100.0));
    }

    #[test]
    fn out_of_range_answer_is_ignored() {
        let quiz = vec![question("Physics", ChoiceLabel::B)];
        let result = UnderstandingScorer::score(&quiz, &[answer(7, "b")]);
        assert_eq!(result.get("Physics"), Some(0.0));
    }

    #[test]
    fn first_answer_wins_for_duplicate_index() {
        let quiz = vec![question("Physics", ChoiceLabel::B)];

        let first_right = UnderstandingScorer::score(&quiz, &[answer(0, "b"), answer(0, "c")]);
        let first_wrong = UnderstandingScorer::score(&quiz, &[answer(0, "c"), answer(0, "b")]);

        assert_eq!(first_right.get("Physics"), Some(100.0));
        assert_eq!(first_wrong.get("Physics"), Some(0.0));
    }

    #[test]
    fn topics_are_grouped_by_exact_label() {
        let quiz = vec![
            question("Algebra", ChoiceLabel::A),
            question("algebra", ChoiceLabel::A),
            question("Algebra ", ChoiceLabel::A),
        ];

        let result = UnderstandingScorer::score(&quiz, &[answer(0, "a")]);

        assert_eq!(result.len(), 3);
        assert_eq!(result.get("Algebra"), Some(100.0));
        assert_eq!(result.get("algebra"), Some(0.0));
        assert_eq!(result.get("Algebra "), Some(0.0));
    }

    #[test]
    fn topics_keep_first_appearance_order() {
        let quiz = vec![
            question("Zoology", ChoiceLabel::A),
            question("Botany", ChoiceLabel::A),
            question("Zoology", ChoiceLabel::A),
            question("Anatomy", ChoiceLabel::A),
        ];

        let result = UnderstandingScorer::score(&quiz, &[]);
        let topics: Vec<&str> = result.scores.keys().map(String::as_str).collect();

        assert_eq!(topics, vec!["Zoology", "Botany", "Anatomy"]);
    }

    #[test]
    fn scores_stay_within_percentage_range() {
        let quiz: Vec<QuizQuestion> = (0..10)
            .map(|i| question(&format!("T{}", i % 3), ChoiceLabel::C))
            .collect();
        let answers: Vec<QuizAnswer> = (0..10)
            .filter(|i| i % 2 == 0)
            .map(|i| answer(i, "c"))
            .collect();

        let result = UnderstandingScorer::score(&quiz, &answers);

        assert_eq!(result.len(), 3);
        assert!(result
            .scores
            .values()
            .all(|score| (0.0..=100.0).contains(score)));
    }

    #[test]
    fn validate_submission_accepts_in_range_answers() {
        let answers = vec![answer(0, "a"), answer(2, "b")];
        assert!(UnderstandingScorer::validate_submission(3, &answers).is_ok());
        assert!(UnderstandingScorer::validate_submission(0, &[]).is_ok());
    }

    #[test]
    fn validate_submission_rejects_out_of_range_index() {
        let err = UnderstandingScorer::validate_submission(3, &[answer(0, "a"), answer(3, "b")])
            .unwrap_err();

        match err {
            AppError::ValidationError(message) => {
                assert!(message.starts_with("answers[1].question_index"));
                assert!(message.contains("out of range"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn validate_submission_rejects_duplicate_index() {
        let err = UnderstandingScorer::validate_submission(3, &[answer(1, "a"), answer(1, "b")])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate answer for question 1"));
    }
}
