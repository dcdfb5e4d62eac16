//! QTI 1.2 assessment XML parsing.
//!
//! Turns a Canvas `questestinterop` document into a [`QuizDocument`].
//! Assessment attributes and every `qtimetadatafield` pass through into the
//! metadata maps verbatim, so Canvas extension fields the parser does not
//! understand still survive the round-trip.
//!
//! A malformed `item` is dropped with a warning instead of aborting the
//! whole document; one bad question must not make an otherwise-valid quiz
//! unloadable.

use std::collections::{BTreeMap, BTreeSet};

use roxmltree::{Document, Node};

use crate::config::{keys, DEFAULT_POINTS};
use crate::error::{QuizpackError, Result};
use crate::types::{Answer, Question, QuestionType, QuizDocument};
use crate::xml::{
    collect_text, find_by_path, find_child, find_children, get_attribute, get_tag_name, get_text,
};

/// Parse raw bytes of a QTI assessment document.
///
/// Decoding is lossy: invalid UTF-8 sequences are replaced rather than
/// rejected, matching how Canvas exports are handled in practice.
pub fn parse_bytes(bytes: &[u8]) -> Result<QuizDocument> {
    parse_document(&String::from_utf8_lossy(bytes))
}

/// Parse a QTI assessment document into a [`QuizDocument`].
///
/// # Errors
/// * [`QuizpackError::XmlParse`] when the XML is malformed
/// * [`QuizpackError::Structure`] when the root is not `questestinterop`
/// * [`QuizpackError::MissingElement`] when there is not exactly one
///   `assessment` element
pub fn parse_document(xml: &str) -> Result<QuizDocument> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    if get_tag_name(root) != "questestinterop" {
        return Err(QuizpackError::Structure(format!(
            "expected <questestinterop> root, found <{}>",
            get_tag_name(root)
        )));
    }

    let mut assessments = find_children(root, "assessment");
    let assessment = assessments.next().ok_or_else(|| QuizpackError::MissingElement {
        element: "assessment".to_string(),
        context: "questestinterop".to_string(),
    })?;
    if assessments.next().is_some() {
        return Err(QuizpackError::MissingElement {
            element: "assessment".to_string(),
            context: "questestinterop (expected exactly one)".to_string(),
        });
    }

    let mut quiz = QuizDocument::default();

    if let Some(title) = get_attribute(assessment, "title") {
        quiz.title = title.to_string();
    }
    if let Some(ident) = get_attribute(assessment, "ident") {
        quiz.metadata
            .insert(keys::CANVAS_IDENTIFIER.to_string(), ident.to_string());
    }
    if let Some(assignment_id) = get_attribute(assessment, "external_assignment_id") {
        quiz.metadata.insert(
            keys::EXTERNAL_ASSIGNMENT_ID.to_string(),
            assignment_id.to_string(),
        );
    }

    // Assessment-level Canvas extension fields, preserved verbatim.
    if let Some(qtimetadata) = find_child(assessment, "qtimetadata") {
        for (label, entry) in metadata_fields(qtimetadata) {
            quiz.metadata.insert(label, entry);
        }
    }

    // Sections are flattened into one ordered question list; the editor
    // only ever produces a single default section.
    for item in assessment
        .descendants()
        .filter(|n| n.is_element() && get_tag_name(*n) == "item")
    {
        match parse_item(item) {
            Ok(question) => quiz.questions.push(question),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    ident = get_attribute(item, "ident").unwrap_or("<none>"),
                    "Skipping malformed item"
                );
            }
        }
    }

    Ok(quiz)
}

/// Read label/entry pairs from a `qtimetadata` element.
fn metadata_fields(qtimetadata: Node<'_, '_>) -> Vec<(String, String)> {
    find_children(qtimetadata, "qtimetadatafield")
        .filter_map(|field| {
            let label = find_child(field, "fieldlabel").map(get_text)?;
            if label.is_empty() {
                return None;
            }
            let entry = find_child(field, "fieldentry").map(get_text).unwrap_or_default();
            Some((label, entry))
        })
        .collect()
}

/// Parse one `item` element into a [`Question`].
fn parse_item(item: Node<'_, '_>) -> Result<Question> {
    let item_meta = item_metadata(item);
    let (correct_ids, max_score) = parse_resprocessing(item);

    let presentation =
        find_child(item, "presentation").ok_or_else(|| QuizpackError::MissingElement {
            element: "presentation".to_string(),
            context: format!("item {}", get_attribute(item, "ident").unwrap_or("<no ident>")),
        })?;

    let response_lid = find_child(presentation, "response_lid");

    // Structural inference; an explicitly declared question_type wins.
    let inferred = if let Some(lid) = response_lid {
        if get_attribute(lid, "rcardinality") == Some("Multiple") {
            QuestionType::MultipleAnswers
        } else {
            QuestionType::MultipleChoice
        }
    } else if find_child(presentation, "response_str").is_some() {
        QuestionType::Essay
    } else {
        QuestionType::Other
    };
    let question_type = item_meta
        .get("question_type")
        .map(|s| QuestionType::from_qti_str(s))
        .unwrap_or(inferred);

    let mut question = Question::new(question_type);
    if let Some(ident) = get_attribute(item, "ident") {
        // Inherited verbatim, never regenerated at parse time.
        question
            .metadata
            .insert(keys::CANVAS_IDENTIFIER.to_string(), ident.to_string());
    }
    if let Some(title) = get_attribute(item, "title") {
        question.set_title(title);
    }

    question.question_text = find_child(presentation, "material")
        .map(material_to_html)
        .unwrap_or_default();

    // points_possible wins over the resprocessing score: the serializer
    // always emits a fixed 100 in setvar, so only the metadata field can
    // carry a question's real point value through a round-trip.
    question.points = item_meta
        .get("points_possible")
        .and_then(|v| v.parse::<f64>().ok())
        .or(max_score)
        .unwrap_or(DEFAULT_POINTS);

    // Remaining item metadata passes through verbatim. The serializer
    // regenerates question_type, points_possible and original_answer_ids
    // from the model, so storing them too would let stale copies diverge.
    for (label, entry) in item_meta {
        if !matches!(
            label.as_str(),
            "question_type" | "points_possible" | "original_answer_ids"
        ) {
            question.metadata.insert(label, entry);
        }
    }

    if let Some(lid) = response_lid {
        if let Some(render) = find_child(lid, "render_choice") {
            for label in render
                .descendants()
                .filter(|n| n.is_element() && get_tag_name(*n) == "response_label")
            {
                question.add_answer(parse_response_label(label, &correct_ids));
            }
        }
    }

    Ok(question)
}

/// Read the `itemmetadata` fields of an item.
fn item_metadata(item: Node<'_, '_>) -> BTreeMap<String, String> {
    find_by_path(item, "itemmetadata/qtimetadata")
        .map(|qtimetadata| metadata_fields(qtimetadata).into_iter().collect())
        .unwrap_or_default()
}

/// Parse one `response_label` into an [`Answer`].
fn parse_response_label(label: Node<'_, '_>, correct_ids: &BTreeSet<String>) -> Answer {
    let text = find_child(label, "material")
        .map(material_to_html)
        .unwrap_or_default();

    match get_attribute(label, "ident") {
        Some(ident) => {
            Answer::with_canvas_identifier(text, correct_ids.contains(ident), ident)
        }
        None => Answer::new(text, false),
    }
}

/// Recover correct answer identifiers and the question score.
///
/// A `respcondition` marks an answer correct only when its `setvar` has
/// `action="Set"` and a numeric value greater than zero. The maximum such
/// value becomes the question's points; this mirrors the single-condition
/// shape of real Canvas exports rather than evaluating general QTI
/// condition logic.
fn parse_resprocessing(item: Node<'_, '_>) -> (BTreeSet<String>, Option<f64>) {
    let mut correct_ids = BTreeSet::new();
    let mut max_score: Option<f64> = None;

    let Some(resprocessing) = find_child(item, "resprocessing") else {
        return (correct_ids, None);
    };

    for condition in find_children(resprocessing, "respcondition") {
        let Some(setvar) = find_child(condition, "setvar") else {
            continue;
        };
        if get_attribute(setvar, "action") != Some("Set") {
            continue;
        }
        let Ok(value) = get_text(setvar).parse::<f64>() else {
            continue;
        };
        if value <= 0.0 {
            continue;
        }

        if let Some(varequal) = find_by_path(condition, "conditionvar/varequal") {
            correct_ids.insert(get_text(varequal));
        }
        max_score = Some(max_score.map_or(value, |m| m.max(value)));
    }

    (correct_ids, max_score)
}

/// Extract the HTML body of a `material` element.
///
/// A `material` wraps one `mattext`. HTML text is used verbatim; plain text
/// is wrapped in `<p>...</p>` so every body is uniformly an HTML fragment
/// downstream (empty text becomes `<p></p>`).
fn material_to_html(material: Node<'_, '_>) -> String {
    let Some(mattext) = find_child(material, "mattext") else {
        return String::new();
    };
    let text = collect_text(mattext);
    if get_attribute(mattext, "texttype") == Some("text/html") {
        text
    } else {
        format!("<p>{}</p>", text.trim())
    }
}
