//! QTI 1.2 assessment serialization and package generation.
//!
//! Produces the three XML artifacts of a Canvas quiz export: the assessment
//! itself, the `assessment_meta.xml` quiz descriptor, and the
//! `imsmanifest.xml` package manifest, and lays them out in the package
//! directory structure Canvas's importer expects:
//!
//! ```text
//! imsmanifest.xml
//! {id}/{id}.xml
//! {id}/assessment_meta.xml
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{
    self, keys, CANVAS_NAMESPACE, CORRECT_ANSWER_SCORE, IMSCP_NAMESPACE, META_RESOURCE_TYPE,
    QTI_NAMESPACE, QTI_RESOURCE_TYPE, QTI_SCHEMA_LOCATION,
};
use crate::error::{QuizpackError, Result};
use crate::types::{Question, QuestionType, QuizDocument};

/// Escape a string for use in XML element text or attribute values.
///
/// # Examples
/// ```
/// use quizpack_core::qti::writer::escape_xml;
///
/// assert_eq!(escape_xml("<p>2 & 2</p>"), "&lt;p&gt;2 &amp; 2&lt;/p&gt;");
/// ```
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Minimal indenting XML builder.
///
/// Element and attribute content is escaped on the way in, so callers never
/// hand-assemble markup.
struct XmlBuilder {
    buf: String,
    depth: usize,
}

impl XmlBuilder {
    fn new() -> Self {
        Self {
            buf: "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n".to_string(),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn push_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape_xml(value));
            self.buf.push('"');
        }
    }

    /// Open an element; must be matched by a `close` with the same tag.
    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.push_attrs(attrs);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    /// Write `<tag attrs>text</tag>` on one line.
    fn leaf(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.push_attrs(attrs);
        self.buf.push('>');
        self.buf.push_str(&escape_xml(text));
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    /// Write a self-closing `<tag attrs/>`.
    fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.push_attrs(attrs);
        self.buf.push_str("/>\n");
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// The assessment identifier a document serializes under.
///
/// Uses the stored `canvas_identifier` when the document came from a parsed
/// package; otherwise generates a fresh hyphen-stripped id.
#[must_use]
pub fn assessment_identifier(doc: &QuizDocument) -> String {
    doc.metadata
        .get(keys::CANVAS_IDENTIFIER)
        .cloned()
        .unwrap_or_else(config::new_canvas_identifier)
}

/// Write one `qtimetadatafield` label/entry pair.
fn metadata_field(xml: &mut XmlBuilder, label: &str, entry: &str) {
    xml.open("qtimetadatafield", &[]);
    xml.leaf("fieldlabel", &[], label);
    xml.leaf("fieldentry", &[], entry);
    xml.close("qtimetadatafield");
}

/// Generate the assessment XML for a document.
///
/// `assessment_id` ties the three package artifacts together; obtain it
/// from [`assessment_identifier`].
#[must_use]
pub fn generate_assessment_xml(doc: &QuizDocument, assessment_id: &str) -> String {
    let mut xml = XmlBuilder::new();
    xml.open(
        "questestinterop",
        &[
            ("xmlns", QTI_NAMESPACE),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ("xsi:schemaLocation", QTI_SCHEMA_LOCATION),
        ],
    );

    let mut assessment_attrs = vec![("ident", assessment_id), ("title", doc.title.as_str())];
    if let Some(assignment_id) = doc.metadata.get(keys::EXTERNAL_ASSIGNMENT_ID) {
        assessment_attrs.push(("external_assignment_id", assignment_id.as_str()));
    }
    xml.open("assessment", &assessment_attrs);

    // Assessment-level extension fields, unknown ones included.
    xml.open("qtimetadata", &[]);
    if !doc.metadata.contains_key(keys::CC_MAXATTEMPTS) {
        metadata_field(&mut xml, keys::CC_MAXATTEMPTS, "1");
    }
    for (label, entry) in &doc.metadata {
        if label != keys::CANVAS_IDENTIFIER && label != keys::EXTERNAL_ASSIGNMENT_ID {
            metadata_field(&mut xml, label, entry);
        }
    }
    xml.close("qtimetadata");

    // The editor only produces a single flat section.
    xml.open("section", &[("ident", "root_section")]);
    for question in &doc.questions {
        write_item(&mut xml, question);
    }
    xml.close("section");

    xml.close("assessment");
    xml.close("questestinterop");
    xml.finish()
}

/// The identifier an answer serializes under.
///
/// The model invariant guarantees a `canvas_identifier`; generate one
/// defensively if it is somehow absent.
fn answer_identifier(answer: &crate::types::Answer) -> String {
    answer
        .canvas_identifier()
        .map(str::to_string)
        .unwrap_or_else(config::new_canvas_identifier)
}

/// Write one `item` element for a question.
fn write_item(xml: &mut XmlBuilder, question: &Question) {
    let ident = question
        .canvas_identifier()
        .map(str::to_string)
        .unwrap_or_else(config::new_canvas_identifier);
    let title = if question.title().is_empty() {
        "Question"
    } else {
        question.title()
    };
    xml.open("item", &[("ident", ident.as_str()), ("title", title)]);

    let answer_ids: Vec<String> = question.answers.iter().map(answer_identifier).collect();

    xml.open("itemmetadata", &[]);
    xml.open("qtimetadata", &[]);
    metadata_field(xml, "question_type", question.question_type.as_qti_str());
    metadata_field(xml, "points_possible", &format!("{:.1}", question.points));
    // Canvas round-trip compatibility field.
    metadata_field(xml, "original_answer_ids", &answer_ids.join(","));
    for (label, entry) in &question.metadata {
        if label != keys::CANVAS_IDENTIFIER && label != keys::CANVAS_TITLE {
            metadata_field(xml, label, entry);
        }
    }
    xml.close("qtimetadata");
    xml.close("itemmetadata");

    xml.open("presentation", &[]);
    xml.open("material", &[]);
    xml.leaf("mattext", &[("texttype", "text/html")], &question.question_text);
    xml.close("material");

    if question.question_type.has_choices() {
        let rcardinality = if question.question_type == QuestionType::MultipleAnswers {
            "Multiple"
        } else {
            "Single"
        };
        xml.open(
            "response_lid",
            &[("ident", "response1"), ("rcardinality", rcardinality)],
        );
        xml.open("render_choice", &[]);
        for (answer, answer_id) in question.answers.iter().zip(&answer_ids) {
            xml.open("response_label", &[("ident", answer_id)]);
            xml.open("material", &[]);
            xml.leaf("mattext", &[("texttype", "text/html")], &answer.text);
            xml.close("material");
            xml.close("response_label");
        }
        xml.close("render_choice");
        xml.close("response_lid");
    } else if matches!(
        question.question_type,
        QuestionType::Essay | QuestionType::FillInBlank
    ) {
        xml.open(
            "response_str",
            &[("ident", "response1"), ("rcardinality", "Single")],
        );
        xml.open("render_fib", &[]);
        xml.empty("response_label", &[("ident", "answer1"), ("rshuffle", "No")]);
        xml.close("render_fib");
        xml.close("response_str");
    }
    xml.close("presentation");

    write_resprocessing(xml, question, &answer_ids);
    xml.close("item");
}

/// Write the `resprocessing` block for a question.
///
/// Every correct answer sets `SCORE` to a fixed 100 regardless of the
/// question's points: Canvas grades these question types binary right/wrong
/// and scales by `points_possible` on import.
fn write_resprocessing(xml: &mut XmlBuilder, question: &Question, answer_ids: &[String]) {
    xml.open("resprocessing", &[]);
    xml.open("outcomes", &[]);
    xml.empty(
        "decvar",
        &[
            ("maxvalue", "100"),
            ("minvalue", "0"),
            ("varname", "SCORE"),
            ("vartype", "Decimal"),
        ],
    );
    xml.close("outcomes");

    let score = format!("{CORRECT_ANSWER_SCORE:.0}");
    for (answer, answer_id) in question.answers.iter().zip(answer_ids) {
        if !answer.is_correct {
            continue;
        }
        xml.open("respcondition", &[("continue", "No")]);
        xml.open("conditionvar", &[]);
        xml.leaf("varequal", &[("respident", "response1")], answer_id);
        xml.close("conditionvar");
        xml.leaf(
            "setvar",
            &[("action", "Set"), ("varname", "SCORE")],
            &score,
        );
        xml.close("respcondition");
    }
    xml.close("resprocessing");
}

/// Generate the `imsmanifest.xml` for a single-assessment package.
///
/// The manifest gets a fresh identifier on every export; only the resource
/// identifiers need to stay stable across round-trips.
#[must_use]
pub fn generate_manifest_xml(assessment_id: &str) -> String {
    let manifest_id = config::new_canvas_identifier();
    let meta_id = format!("{assessment_id}_meta");
    let assessment_href = format!("{assessment_id}/{assessment_id}.xml");
    let meta_href = format!("{assessment_id}/assessment_meta.xml");

    let mut xml = XmlBuilder::new();
    xml.open(
        "manifest",
        &[
            ("identifier", manifest_id.as_str()),
            ("xmlns", IMSCP_NAMESPACE),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    );

    xml.open("metadata", &[]);
    xml.leaf("schema", &[], "IMS Content");
    xml.leaf("schemaversion", &[], "1.1.3");
    xml.close("metadata");

    xml.empty("organizations", &[]);

    xml.open("resources", &[]);
    xml.open(
        "resource",
        &[("identifier", assessment_id), ("type", QTI_RESOURCE_TYPE)],
    );
    xml.empty("file", &[("href", &assessment_href)]);
    xml.empty("dependency", &[("identifierref", &meta_id)]);
    xml.close("resource");
    xml.open(
        "resource",
        &[
            ("identifier", meta_id.as_str()),
            ("type", META_RESOURCE_TYPE),
            ("href", meta_href.as_str()),
        ],
    );
    xml.empty("file", &[("href", &meta_href)]);
    xml.close("resource");
    xml.close("resources");

    xml.close("manifest");
    xml.finish()
}

/// Generate the `assessment_meta.xml` Canvas quiz descriptor.
///
/// Nests an assignment descriptor inside the quiz descriptor; fields Canvas
/// requires but this editor does not model are defaulted to empty/false so
/// the export validates against Canvas's importer.
#[must_use]
pub fn generate_meta_xml(doc: &QuizDocument, assessment_id: &str) -> String {
    let points = format!("{:.1}", doc.points_possible());
    let attempts = doc
        .metadata
        .get(keys::CC_MAXATTEMPTS)
        .map(String::as_str)
        .unwrap_or("1");
    let assignment_id = doc
        .metadata
        .get(keys::EXTERNAL_ASSIGNMENT_ID)
        .cloned()
        .unwrap_or_else(config::new_canvas_identifier);

    let mut xml = XmlBuilder::new();
    xml.open(
        "quiz",
        &[
            ("identifier", assessment_id),
            ("xmlns", CANVAS_NAMESPACE),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    );
    xml.leaf("title", &[], &doc.title);
    xml.leaf("description", &[], &doc.description);
    xml.leaf("shuffle_answers", &[], "false");
    xml.leaf("scoring_policy", &[], "keep_highest");
    xml.leaf("hide_results", &[], "");
    xml.leaf("quiz_type", &[], "assignment");
    xml.leaf("points_possible", &[], &points);
    xml.leaf("require_lockdown_browser", &[], "false");
    xml.leaf("require_lockdown_browser_for_results", &[], "false");
    xml.leaf("require_lockdown_browser_monitor", &[], "false");
    xml.leaf("lockdown_browser_monitor_data", &[], "");
    xml.leaf("show_correct_answers", &[], "true");
    xml.leaf("anonymous_submissions", &[], "false");
    xml.leaf("could_be_locked", &[], "false");
    xml.leaf("allowed_attempts", &[], attempts);
    xml.leaf("one_question_at_a_time", &[], "false");
    xml.leaf("cant_go_back", &[], "false");
    xml.leaf("available", &[], "false");
    xml.leaf("one_time_results", &[], "false");
    xml.leaf("show_correct_answers_last_attempt", &[], "false");
    xml.leaf("only_visible_to_overrides", &[], "false");
    xml.leaf("module_locked", &[], "false");

    xml.open("assignment", &[("identifier", assignment_id.as_str())]);
    xml.leaf("title", &[], &doc.title);
    xml.leaf("due_at", &[], "");
    xml.leaf("lock_at", &[], "");
    xml.leaf("unlock_at", &[], "");
    xml.leaf("module_locked", &[], "false");
    xml.leaf("workflow_state", &[], "unpublished");
    xml.empty("assignment_overrides", &[]);
    xml.leaf("quiz_identifierref", &[], assessment_id);
    xml.leaf("allowed_extensions", &[], "");
    xml.leaf("has_group_category", &[], "false");
    xml.leaf("points_possible", &[], &points);
    xml.leaf("grading_type", &[], "points");
    xml.leaf("all_day", &[], "false");
    xml.leaf("submission_types", &[], "online_quiz");
    xml.leaf("position", &[], "1");
    xml.leaf("peer_review_count", &[], "0");
    xml.leaf("peer_reviews", &[], "false");
    xml.leaf("automatic_peer_reviews", &[], "false");
    xml.leaf("moderated_grading", &[], "false");
    xml.leaf("omit_from_final_grade", &[], "false");
    xml.leaf("intra_group_peer_reviews", &[], "false");
    xml.close("assignment");

    xml.close("quiz");
    xml.finish()
}

/// Write file content atomically: temp file, sync, rename.
///
/// Partial writes must not corrupt an existing export on crash.
fn write_file(path: &Path, content: &str) -> Result<()> {
    let write_err = |source: std::io::Error| QuizpackError::Write {
        path: path.to_path_buf(),
        source,
    };

    let temp_path = path.with_extension("xml.tmp");
    {
        let mut file = File::create(&temp_path).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path).map_err(write_err)?;
    }

    fs::rename(&temp_path, path).map_err(write_err)?;
    Ok(())
}

/// Write the full package directory for a document.
///
/// Lays out `imsmanifest.xml` at the root and `{id}/{id}.xml` plus
/// `{id}/assessment_meta.xml` in the quiz subdirectory. The directory is
/// ready to be zipped into an IMSCC archive by the archive collaborator.
///
/// # Returns
/// The package directory path.
///
/// # Errors
/// [`QuizpackError::Write`] naming the file that failed.
pub fn write_package(doc: &QuizDocument, output_dir: &Path) -> Result<PathBuf> {
    let assessment_id = assessment_identifier(doc);
    let quiz_dir = output_dir.join(&assessment_id);
    fs::create_dir_all(&quiz_dir).map_err(|source| QuizpackError::Write {
        path: quiz_dir.clone(),
        source,
    })?;

    write_file(
        &output_dir.join("imsmanifest.xml"),
        &generate_manifest_xml(&assessment_id),
    )?;
    write_file(
        &quiz_dir.join(format!("{assessment_id}.xml")),
        &generate_assessment_xml(doc, &assessment_id),
    )?;
    write_file(
        &quiz_dir.join("assessment_meta.xml"),
        &generate_meta_xml(doc, &assessment_id),
    )?;

    Ok(output_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Answer;
    use tempfile::tempdir;

    fn sample_document() -> QuizDocument {
        let mut doc = QuizDocument::new("Unit 3 Quiz");
        doc.description = "<p>Weekly check-in</p>".to_string();
        doc.metadata.insert(
            keys::CANVAS_IDENTIFIER.to_string(),
            "g1aff520704fa0d16ba5b2b32aa6e214f".to_string(),
        );
        doc.metadata
            .insert(keys::CC_MAXATTEMPTS.to_string(), "2".to_string());

        let mut question = Question::new(QuestionType::MultipleChoice);
        question.set_title("Capital");
        question.question_text = "<p>What is the capital of France?</p>".to_string();
        question.points = 2.5;
        question.add_answer(Answer::with_canvas_identifier("<p>Paris</p>", true, "a1"));
        question.add_answer(Answer::with_canvas_identifier("<p>Lyon</p>", false, "a2"));
        doc.add_question(question);

        doc
    }

    #[test]
    fn test_escape_xml_all_special_characters() {
        assert_eq!(
            escape_xml(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_assessment_identifier_stored() {
        let doc = sample_document();
        assert_eq!(
            assessment_identifier(&doc),
            "g1aff520704fa0d16ba5b2b32aa6e214f"
        );
    }

    #[test]
    fn test_assessment_identifier_generated_when_absent() {
        let doc = QuizDocument::new("Quiz");
        let id = assessment_identifier(&doc);
        assert!(id.starts_with('g'));
        assert!(!id.contains('-'));
    }

    #[test]
    fn test_generate_assessment_xml_structure() {
        let doc = sample_document();
        let xml = generate_assessment_xml(&doc, "g1aff520704fa0d16ba5b2b32aa6e214f");

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains("<questestinterop xmlns=\"http://www.imsglobal.org/xsd/ims_qtiasiv1p2\""));
        assert!(xml.contains(
            "<assessment ident=\"g1aff520704fa0d16ba5b2b32aa6e214f\" title=\"Unit 3 Quiz\">"
        ));
        assert!(xml.contains("<section ident=\"root_section\">"));
        assert!(xml.contains("<item ident="));
    }

    #[test]
    fn test_generate_assessment_xml_escapes_html_body() {
        let doc = sample_document();
        let xml = generate_assessment_xml(&doc, "gid");

        assert!(xml.contains("&lt;p&gt;What is the capital of France?&lt;/p&gt;"));
        assert!(!xml.contains("<p>What is the capital of France?</p>"));
    }

    #[test]
    fn test_generate_assessment_xml_item_metadata() {
        let doc = sample_document();
        let xml = generate_assessment_xml(&doc, "gid");

        assert!(xml.contains("<fieldlabel>question_type</fieldlabel>"));
        assert!(xml.contains("<fieldentry>multiple_choice_question</fieldentry>"));
        assert!(xml.contains("<fieldentry>2.5</fieldentry>")); // one decimal place
        assert!(xml.contains("<fieldlabel>original_answer_ids</fieldlabel>"));
        assert!(xml.contains("<fieldentry>a1,a2</fieldentry>"));
    }

    #[test]
    fn test_generate_assessment_xml_fixed_scoring() {
        let mut doc = sample_document();
        // Whatever the points value, the emitted score is 100.
        doc.questions[0].points = 7.5;
        let xml = generate_assessment_xml(&doc, "gid");

        assert!(xml.contains(r#"<setvar action="Set" varname="SCORE">100</setvar>"#));
        assert!(!xml.contains(r#">7.5</setvar>"#));
        assert!(xml.contains(r#"<varequal respident="response1">a1</varequal>"#));
        // Only the correct answer gets a respcondition.
        assert!(!xml.contains(r#"<varequal respident="response1">a2</varequal>"#));
    }

    #[test]
    fn test_generate_assessment_xml_multiple_answers_cardinality() {
        let mut doc = QuizDocument::new("Quiz");
        let mut question = Question::new(QuestionType::MultipleAnswers);
        question.add_answer(Answer::new("<p>A</p>", true));
        doc.add_question(question);

        let xml = generate_assessment_xml(&doc, "gid");
        assert!(xml.contains(r#"rcardinality="Multiple""#));
    }

    #[test]
    fn test_generate_assessment_xml_essay_uses_response_str() {
        let mut doc = QuizDocument::new("Quiz");
        doc.add_question(Question::new(QuestionType::Essay));

        let xml = generate_assessment_xml(&doc, "gid");
        assert!(xml.contains("<response_str"));
        assert!(!xml.contains("<response_lid"));
    }

    #[test]
    fn test_generate_assessment_xml_default_max_attempts() {
        let doc = QuizDocument::new("Quiz");
        let xml = generate_assessment_xml(&doc, "gid");

        assert!(xml.contains("<fieldlabel>cc_maxattempts</fieldlabel>"));
        assert!(xml.contains("<fieldentry>1</fieldentry>"));
    }

    #[test]
    fn test_generate_manifest_xml_resources() {
        let xml = generate_manifest_xml("gid");

        assert!(xml.contains(r#"type="imsqti_xmlv1p2""#));
        assert!(xml.contains(r#"<file href="gid/gid.xml"/>"#));
        assert!(xml.contains(r#"<dependency identifierref="gid_meta"/>"#));
        assert!(xml.contains(
            r#"type="associatedcontent/imscc_xmlv1p1/learning-application-resource""#
        ));
        assert!(xml.contains(r#"<file href="gid/assessment_meta.xml"/>"#));
    }

    #[test]
    fn test_generate_meta_xml_quiz_descriptor() {
        let doc = sample_document();
        let xml = generate_meta_xml(&doc, "gid");

        assert!(xml.contains("<title>Unit 3 Quiz</title>"));
        assert!(xml.contains("<description>&lt;p&gt;Weekly check-in&lt;/p&gt;</description>"));
        assert!(xml.contains("<points_possible>2.5</points_possible>"));
        assert!(xml.contains("<allowed_attempts>2</allowed_attempts>"));
        assert!(xml.contains("<assignment identifier="));
        assert!(xml.contains("<quiz_identifierref>gid</quiz_identifierref>"));
    }

    #[test]
    fn test_write_package_layout() {
        let doc = sample_document();
        let dir = tempdir().unwrap();
        write_package(&doc, dir.path()).unwrap();

        let id = "g1aff520704fa0d16ba5b2b32aa6e214f";
        assert!(dir.path().join("imsmanifest.xml").is_file());
        assert!(dir.path().join(id).join(format!("{id}.xml")).is_file());
        assert!(dir.path().join(id).join("assessment_meta.xml").is_file());
        // No temp files left behind.
        assert!(!dir.path().join(id).join(format!("{id}.xml.tmp")).exists());
    }

    #[test]
    fn test_write_package_overwrites_existing() {
        let doc = sample_document();
        let dir = tempdir().unwrap();
        write_package(&doc, dir.path()).unwrap();
        write_package(&doc, dir.path()).unwrap();

        assert!(dir.path().join("imsmanifest.xml").is_file());
    }

    #[test]
    fn test_write_package_error_carries_path() {
        let doc = sample_document();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("not_a_dir");
        std::fs::write(&file_path, b"x").unwrap();

        let err = write_package(&doc, &file_path).unwrap_err();
        assert!(matches!(err, QuizpackError::Write { .. }));
    }
}
