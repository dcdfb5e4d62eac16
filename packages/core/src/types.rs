//! Core data types for the quiz document model.
//!
//! These are plain value types: the parser builds them, the serializer reads
//! them, and the host editor mutates copies of them. Identity that must
//! survive a Canvas round-trip lives in the metadata maps under
//! `canvas_identifier`; the `id` fields are ephemeral, UI-facing identity
//! only and are never serialized into XML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{self, keys};

/// Question types recognized by the Canvas QTI flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Essay,
    FillInBlank,
    Matching,
    MultipleAnswers,
    Numerical,
    /// Any QTI question type this editor does not model explicitly.
    Other,
}

impl QuestionType {
    /// Get the Canvas `question_type` metadata string.
    #[must_use]
    pub fn as_qti_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice_question",
            Self::TrueFalse => "true_false_question",
            Self::Essay => "essay_question",
            Self::FillInBlank => "short_answer_question",
            Self::Matching => "matching_question",
            Self::MultipleAnswers => "multiple_answers_question",
            Self::Numerical => "numerical_question",
            Self::Other => "text_only_question",
        }
    }

    /// Parse a Canvas `question_type` metadata string.
    ///
    /// Unknown strings map to [`QuestionType::Other`] so exports from newer
    /// Canvas versions still load.
    #[must_use]
    pub fn from_qti_str(text: &str) -> Self {
        match text {
            "multiple_choice_question" => Self::MultipleChoice,
            "true_false_question" => Self::TrueFalse,
            "essay_question" => Self::Essay,
            "short_answer_question" | "fill_in_multiple_blanks_question" => Self::FillInBlank,
            "matching_question" => Self::Matching,
            "multiple_answers_question" => Self::MultipleAnswers,
            "numerical_question" => Self::Numerical,
            _ => Self::Other,
        }
    }

    /// Whether items of this type carry a `response_lid` choice block.
    #[must_use]
    pub fn has_choices(&self) -> bool {
        matches!(
            self,
            Self::MultipleChoice | Self::TrueFalse | Self::MultipleAnswers | Self::Matching
        )
    }
}

/// A single answer option belonging to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Ephemeral internal id (UI identity, never serialized).
    pub id: String,

    /// Answer body as an HTML fragment.
    pub text: String,

    /// Whether this answer is scored as correct.
    pub is_correct: bool,

    /// Feedback shown when this answer is chosen.
    pub feedback: String,

    /// Answer weight: 100 for correct answers, 0 otherwise.
    pub weight: f64,

    /// Open metadata bag; holds `canvas_identifier` and any unknown
    /// Canvas extension fields.
    pub metadata: BTreeMap<String, String>,
}

impl Answer {
    /// Create a new answer with a fresh internal id and Canvas identifier.
    ///
    /// # Examples
    /// ```
    /// use quizpack_core::types::Answer;
    ///
    /// let answer = Answer::new("<p>Paris</p>", true);
    /// assert!(answer.is_correct);
    /// assert_eq!(answer.weight, 100.0);
    /// assert!(answer.canvas_identifier().is_some());
    /// ```
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            keys::CANVAS_IDENTIFIER.to_string(),
            config::new_canvas_identifier(),
        );
        Self {
            id: config::new_internal_id(),
            text: text.into(),
            is_correct,
            feedback: String::new(),
            weight: if is_correct { 100.0 } else { 0.0 },
            metadata,
        }
    }

    /// Create an answer whose Canvas identifier is inherited from a parsed
    /// source document instead of freshly generated.
    #[must_use]
    pub fn with_canvas_identifier(
        text: impl Into<String>,
        is_correct: bool,
        identifier: impl Into<String>,
    ) -> Self {
        let mut answer = Self::new(text, is_correct);
        answer
            .metadata
            .insert(keys::CANVAS_IDENTIFIER.to_string(), identifier.into());
        answer
    }

    /// The stable Canvas identifier serialized into QTI XML.
    #[must_use]
    pub fn canvas_identifier(&self) -> Option<&str> {
        self.metadata.get(keys::CANVAS_IDENTIFIER).map(String::as_str)
    }
}

/// A single quiz question with its ordered answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Ephemeral internal id (UI identity, never serialized).
    pub id: String,

    /// The question type.
    pub question_type: QuestionType,

    /// Question body as an HTML fragment.
    pub question_text: String,

    /// Points possible for this question.
    pub points: f64,

    /// Ordered answer options.
    pub answers: Vec<Answer>,

    /// Feedback shown regardless of the chosen answer.
    pub general_feedback: String,

    /// Open metadata bag; holds `canvas_identifier`, `canvas_title`,
    /// `calculator_type` and any unknown Canvas extension fields.
    pub metadata: BTreeMap<String, String>,
}

impl Question {
    /// Create a new question with a fresh internal id and Canvas identifier.
    #[must_use]
    pub fn new(question_type: QuestionType) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            keys::CANVAS_IDENTIFIER.to_string(),
            config::new_canvas_identifier(),
        );
        Self {
            id: config::new_internal_id(),
            question_type,
            question_text: String::new(),
            points: crate::config::DEFAULT_POINTS,
            answers: Vec::new(),
            general_feedback: String::new(),
            metadata,
        }
    }

    /// The stable Canvas identifier serialized into QTI XML.
    #[must_use]
    pub fn canvas_identifier(&self) -> Option<&str> {
        self.metadata.get(keys::CANVAS_IDENTIFIER).map(String::as_str)
    }

    /// Question title, stored in metadata under `canvas_title`.
    #[must_use]
    pub fn title(&self) -> &str {
        self.metadata
            .get(keys::CANVAS_TITLE)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Set the question title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata
            .insert(keys::CANVAS_TITLE.to_string(), title.into());
    }

    /// Append an answer to this question.
    pub fn add_answer(&mut self, answer: Answer) {
        self.answers.push(answer);
    }

    /// Whether any answer is marked correct.
    #[must_use]
    pub fn has_correct_answer(&self) -> bool {
        self.answers.iter().any(|a| a.is_correct)
    }
}

/// A complete quiz document: title, description, ordered questions, and
/// assessment-level Canvas extension fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuizDocument {
    /// Quiz title.
    pub title: String,

    /// Quiz description as an HTML fragment.
    pub description: String,

    /// Ordered questions.
    pub questions: Vec<Question>,

    /// Assessment-level metadata (e.g. `canvas_identifier`,
    /// `external_assignment_id`, `cc_maxattempts`).
    pub metadata: BTreeMap<String, String>,
}

impl QuizDocument {
    /// Create an empty document with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append a question to the document.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Find a question by its ephemeral internal id.
    #[must_use]
    pub fn question_by_id(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Total points possible across all questions.
    #[must_use]
    pub fn points_possible(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_round_trip() {
        for qt in [
            QuestionType::MultipleChoice,
            QuestionType::TrueFalse,
            QuestionType::Essay,
            QuestionType::FillInBlank,
            QuestionType::Matching,
            QuestionType::MultipleAnswers,
            QuestionType::Numerical,
        ] {
            assert_eq!(QuestionType::from_qti_str(qt.as_qti_str()), qt);
        }
    }

    #[test]
    fn test_question_type_unknown_maps_to_other() {
        assert_eq!(
            QuestionType::from_qti_str("calculated_question"),
            QuestionType::Other
        );
    }

    #[test]
    fn test_question_type_has_choices() {
        assert!(QuestionType::MultipleChoice.has_choices());
        assert!(QuestionType::TrueFalse.has_choices());
        assert!(QuestionType::MultipleAnswers.has_choices());
        assert!(!QuestionType::Essay.has_choices());
        assert!(!QuestionType::FillInBlank.has_choices());
    }

    #[test]
    fn test_answer_weight_defaults() {
        assert_eq!(Answer::new("a", true).weight, 100.0);
        assert_eq!(Answer::new("b", false).weight, 0.0);
    }

    #[test]
    fn test_answer_inherited_identifier() {
        let answer = Answer::with_canvas_identifier("<p>Yes</p>", true, "answer_4907");
        assert_eq!(answer.canvas_identifier(), Some("answer_4907"));
    }

    #[test]
    fn test_question_new_generates_identifier_once() {
        let question = Question::new(QuestionType::MultipleChoice);
        let first = question.canvas_identifier().map(str::to_string);
        assert!(first.is_some());
        // Cloning (what the editor does on duplicate) keeps the identifier.
        let copy = question.clone();
        assert_eq!(copy.canvas_identifier().map(str::to_string), first);
    }

    #[test]
    fn test_question_title_accessors() {
        let mut question = Question::new(QuestionType::Essay);
        assert_eq!(question.title(), "");
        question.set_title("Question 1");
        assert_eq!(question.title(), "Question 1");
        assert_eq!(
            question.metadata.get("canvas_title").map(String::as_str),
            Some("Question 1")
        );
    }

    #[test]
    fn test_has_correct_answer() {
        let mut question = Question::new(QuestionType::MultipleChoice);
        question.add_answer(Answer::new("a", false));
        assert!(!question.has_correct_answer());
        question.add_answer(Answer::new("b", true));
        assert!(question.has_correct_answer());
    }

    #[test]
    fn test_document_points_possible() {
        let mut doc = QuizDocument::new("Quiz");
        let mut q1 = Question::new(QuestionType::MultipleChoice);
        q1.points = 2.5;
        let mut q2 = Question::new(QuestionType::Essay);
        q2.points = 1.0;
        doc.add_question(q1);
        doc.add_question(q2);
        assert_eq!(doc.points_possible(), 3.5);
    }

    #[test]
    fn test_document_question_by_id() {
        let mut doc = QuizDocument::new("Quiz");
        let question = Question::new(QuestionType::TrueFalse);
        let id = question.id.clone();
        doc.add_question(question);

        assert!(doc.question_by_id(&id).is_some());
        assert!(doc.question_by_id("missing").is_none());
    }
}
