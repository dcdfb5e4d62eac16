//! Search and replace over quiz document text fields.
//!
//! Matching runs over the model's text fields (question title, question
//! body, answer bodies, feedback) in document order. Literal patterns are
//! escaped and compiled through the same regex machinery as regex patterns,
//! so case folding is resolved once at compile time and match ranges never
//! overlap.
//!
//! Replacement is snapshot-in/snapshot-out: [`replace_all`] leaves the input
//! document untouched and returns a rewritten copy. Each field is rewritten
//! exactly once against its current text, so earlier replacements in a batch
//! can never invalidate later match positions.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{QuizpackError, Result};
use crate::template::expand_template;
use crate::text::context_snippet;
use crate::types::{Question, QuizDocument};

/// Which questions a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchScope {
    /// Only the question named by `current_question_id`.
    CurrentQuestion,
    /// Every question in the document.
    AllQuestions,
}

/// A concrete text field a match was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchField {
    QuestionTitle,
    QuestionText,
    AnswerText,
    Feedback,
}

/// Which fields a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldFilter {
    QuestionTitle,
    QuestionText,
    AnswerText,
    Feedback,
    All,
}

impl FieldFilter {
    /// Whether a field is included by this filter.
    #[must_use]
    pub fn includes(&self, field: SearchField) -> bool {
        match self {
            Self::All => true,
            Self::QuestionTitle => field == SearchField::QuestionTitle,
            Self::QuestionText => field == SearchField::QuestionText,
            Self::AnswerText => field == SearchField::AnswerText,
            Self::Feedback => field == SearchField::Feedback,
        }
    }
}

/// Parameters for a search or replace operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Literal text or regex pattern, depending on `regex`.
    pub pattern: String,

    /// Treat `pattern` as a regular expression.
    pub regex: bool,

    /// Case-sensitive matching.
    pub case_sensitive: bool,

    /// Which questions to search.
    pub scope: SearchScope,

    /// Which fields to search.
    pub field: FieldFilter,

    /// Internal id of the active question; required for
    /// [`SearchScope::CurrentQuestion`].
    pub current_question_id: Option<String>,
}

impl SearchOptions {
    /// Create options for a case-sensitive literal search over all
    /// questions and fields.
    #[must_use]
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            regex: false,
            case_sensitive: true,
            scope: SearchScope::AllQuestions,
            field: FieldFilter::All,
            current_question_id: None,
        }
    }
}

/// A single match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// Internal id of the question the match is in.
    pub question_id: String,

    /// Field the match is in.
    pub field: SearchField,

    /// Internal id of the answer, for answer-level fields.
    pub answer_id: Option<String>,

    /// Byte range of the match within the field's text.
    pub range: Range<usize>,

    /// The matched text.
    pub matched_text: String,

    /// Tag-stripped context window around the match.
    pub context: String,
}

/// A pattern compiled once per operation.
struct CompiledPattern {
    regex: Regex,
    is_regex: bool,
}

impl CompiledPattern {
    /// Compile the pattern from search options.
    ///
    /// Literal patterns are escaped before compilation, so
    /// [`QuizpackError::InvalidPattern`] can only arise in regex mode.
    fn compile(options: &SearchOptions) -> Result<Self> {
        let source = if options.regex {
            options.pattern.clone()
        } else {
            regex::escape(&options.pattern)
        };
        let regex = RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|source| QuizpackError::InvalidPattern {
                pattern: options.pattern.clone(),
                source,
            })?;
        Ok(Self {
            regex,
            is_regex: options.regex,
        })
    }
}

/// Whether a question falls inside the search scope.
fn in_scope(question: &Question, options: &SearchOptions) -> bool {
    match options.scope {
        SearchScope::AllQuestions => true,
        SearchScope::CurrentQuestion => options
            .current_question_id
            .as_deref()
            .is_some_and(|id| id == question.id),
    }
}

/// The searchable fields of a question, in presentation order.
fn question_fields(question: &Question) -> Vec<(SearchField, Option<String>, String)> {
    let mut fields = vec![
        (SearchField::QuestionTitle, None, question.title().to_string()),
        (SearchField::QuestionText, None, question.question_text.clone()),
        (SearchField::Feedback, None, question.general_feedback.clone()),
    ];
    for answer in &question.answers {
        fields.push((
            SearchField::AnswerText,
            Some(answer.id.clone()),
            answer.text.clone(),
        ));
        fields.push((
            SearchField::Feedback,
            Some(answer.id.clone()),
            answer.feedback.clone(),
        ));
    }
    fields
}

/// Search a document's text fields.
///
/// Returns matches in document order: questions in sequence, and within a
/// question its title, body, general feedback, then each answer's body and
/// feedback.
///
/// # Errors
/// Returns [`QuizpackError::InvalidPattern`] when a regex pattern fails to
/// compile.
pub fn search_document(doc: &QuizDocument, options: &SearchOptions) -> Result<Vec<SearchMatch>> {
    if options.pattern.is_empty() {
        return Ok(Vec::new());
    }
    let pattern = CompiledPattern::compile(options)?;

    let mut matches = Vec::new();
    for question in doc.questions.iter().filter(|q| in_scope(q, options)) {
        for (field, answer_id, text) in question_fields(question) {
            if !options.field.includes(field) {
                continue;
            }
            for m in pattern.regex.find_iter(&text) {
                matches.push(SearchMatch {
                    question_id: question.id.clone(),
                    field,
                    answer_id: answer_id.clone(),
                    range: m.range(),
                    matched_text: m.as_str().to_string(),
                    context: context_snippet(&text, &m.range()),
                });
            }
        }
    }
    Ok(matches)
}

/// Rewrite a single field's text, replacing every match once.
///
/// Returns the rewritten text and the number of replacements made.
fn rewrite_field(pattern: &CompiledPattern, text: &str, template: &str) -> (String, usize) {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;
    let mut count = 0;

    if pattern.is_regex {
        for caps in pattern.regex.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            result.push_str(&text[last_end..m.start()]);
            result.push_str(&expand_template(&caps, template));
            last_end = m.end();
            count += 1;
        }
    } else {
        // Literal mode: unconditional substitution, no capture semantics.
        for m in pattern.regex.find_iter(text) {
            result.push_str(&text[last_end..m.start()]);
            result.push_str(template);
            last_end = m.end();
            count += 1;
        }
    }

    result.push_str(&text[last_end..]);
    (result, count)
}

/// Replace every match in the document with the expanded template.
///
/// The input document is not modified; a rewritten copy is returned along
/// with the number of replacements performed. In regex mode the template is
/// expanded per match via [`expand_template`]; in literal mode it is
/// substituted verbatim.
///
/// # Errors
/// Returns [`QuizpackError::InvalidPattern`] when a regex pattern fails to
/// compile.
pub fn replace_all(
    doc: &QuizDocument,
    options: &SearchOptions,
    template: &str,
) -> Result<(QuizDocument, usize)> {
    if options.pattern.is_empty() {
        return Ok((doc.clone(), 0));
    }
    let pattern = CompiledPattern::compile(options)?;

    let mut result = doc.clone();
    let mut total = 0;

    for question in result.questions.iter_mut() {
        if !in_scope(question, options) {
            continue;
        }

        if options.field.includes(SearchField::QuestionTitle) {
            let (text, count) = rewrite_field(&pattern, question.title(), template);
            if count > 0 {
                question.set_title(text);
                total += count;
            }
        }
        if options.field.includes(SearchField::QuestionText) {
            let (text, count) = rewrite_field(&pattern, &question.question_text, template);
            if count > 0 {
                question.question_text = text;
                total += count;
            }
        }
        if options.field.includes(SearchField::Feedback) {
            let (text, count) = rewrite_field(&pattern, &question.general_feedback, template);
            if count > 0 {
                question.general_feedback = text;
                total += count;
            }
        }
        for answer in question.answers.iter_mut() {
            if options.field.includes(SearchField::AnswerText) {
                let (text, count) = rewrite_field(&pattern, &answer.text, template);
                if count > 0 {
                    answer.text = text;
                    total += count;
                }
            }
            if options.field.includes(SearchField::Feedback) {
                let (text, count) = rewrite_field(&pattern, &answer.feedback, template);
                if count > 0 {
                    answer.feedback = text;
                    total += count;
                }
            }
        }
    }

    Ok((result, total))
}
