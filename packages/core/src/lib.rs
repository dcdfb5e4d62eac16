//! Quizpack Core - Quiz documents as Canvas-compatible QTI 1.2 packages.
//!
//! This crate converts between an in-memory quiz document model and the
//! QTI 1.2 XML dialect that Canvas LMS exports and imports, generates the
//! IMSCC package layout around the assessment XML, and provides a regex
//! search/replace engine over document text fields.
//!
//! # Example
//!
//! ```
//! use quizpack_core::types::{Answer, Question, QuestionType, QuizDocument};
//! use quizpack_core::qti::{parser, writer};
//!
//! let mut doc = QuizDocument::new("Week 3 Quiz");
//! let mut question = Question::new(QuestionType::MultipleChoice);
//! question.question_text = "<p>What is 2 + 2?</p>".to_string();
//! question.add_answer(Answer::new("<p>4</p>", true));
//! question.add_answer(Answer::new("<p>5</p>", false));
//! doc.add_question(question);
//!
//! let assessment_id = writer::assessment_identifier(&doc);
//! let xml = writer::generate_assessment_xml(&doc, &assessment_id);
//! let parsed = parser::parse_document(&xml).unwrap();
//! assert_eq!(parsed.title, "Week 3 Quiz");
//! assert_eq!(parsed.questions.len(), 1);
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Namespace constants, metadata keys, identifier generation
//! - [`types`]: Core data types (QuizDocument, Question, Answer)
//! - [`error`]: Error types and Result alias
//! - [`qti`]: QTI 1.2 parsing and serialization
//! - [`package`]: IMSCC package import/export orchestration
//! - [`search`]: Regex and literal search/replace over document fields
//! - [`template`]: Capture-group replacement templates
//! - [`text`]: HTML stripping and context snippets
//! - [`xml`]: XML tree utilities

pub mod config;
pub mod error;
pub mod package;
pub mod qti;
pub mod search;
pub mod template;
pub mod text;
pub mod types;
pub mod xml;

// Re-export main functions
pub use package::{export_quiz, import_quiz, locate_assessment_file, ArchiveHandler};
pub use qti::parser::{parse_bytes, parse_document};
pub use qti::writer::{assessment_identifier, generate_assessment_xml, write_package};
pub use search::{replace_all, search_document};

// Re-export commonly used items
pub use error::{QuizpackError, Result};
pub use search::{FieldFilter, SearchField, SearchMatch, SearchOptions, SearchScope};
pub use types::{Answer, Question, QuestionType, QuizDocument};
