//! End-to-end integration tests over a real-shaped Canvas export.
//!
//! Tests the complete path from extracted package directory to document
//! model and back to a package directory, using fixture data modeled on a
//! Canvas quiz export ("Biology Midterm Review").

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use quizpack_core::qti::{parser, writer};
use quizpack_core::search::{FieldFilter, SearchOptions, SearchScope};
use quizpack_core::types::{Question, QuestionType, QuizDocument};
use quizpack_core::{locate_assessment_file, search_document};

/// Path of the extracted-package fixture directory.
fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("canvas_export")
}

/// Load and parse the fixture assessment.
fn load_fixture_quiz() -> QuizDocument {
    let assessment_file = locate_assessment_file(&fixture_dir())
        .unwrap_or_else(|e| panic!("Failed to locate fixture assessment: {e}"));
    let bytes = fs::read(&assessment_file)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", assessment_file.display()));
    parser::parse_bytes(&bytes).unwrap_or_else(|e| panic!("Failed to parse fixture: {e}"))
}

#[test]
fn test_locate_finds_canvas_layout() {
    let found = locate_assessment_file(&fixture_dir()).unwrap();
    assert!(found.ends_with(
        "g8f2c1a9e4b7d3f6a0c5e8b1d4a7f2c3e/g8f2c1a9e4b7d3f6a0c5e8b1d4a7f2c3e.xml"
    ));
}

#[test]
fn test_fixture_parses_into_expected_model() {
    let quiz = load_fixture_quiz();

    assert_eq!(quiz.title, "Biology Midterm Review");
    assert_eq!(
        quiz.metadata.get("canvas_identifier").map(String::as_str),
        Some("g8f2c1a9e4b7d3f6a0c5e8b1d4a7f2c3e")
    );
    assert_eq!(
        quiz.metadata.get("cc_maxattempts").map(String::as_str),
        Some("3")
    );
    assert_eq!(
        quiz.metadata.get("qmd_timelimit").map(String::as_str),
        Some("45")
    );

    assert_eq!(quiz.questions.len(), 3);
    let types: Vec<_> = quiz.questions.iter().map(|q| q.question_type).collect();
    assert_eq!(
        types,
        vec![
            QuestionType::MultipleChoice,
            QuestionType::TrueFalse,
            QuestionType::Essay
        ]
    );
    assert_eq!(quiz.points_possible(), 8.0);

    let organelles = &quiz.questions[0];
    assert_eq!(organelles.title(), "Organelles");
    assert_eq!(organelles.answers.len(), 4);
    let correct: Vec<_> = organelles
        .answers
        .iter()
        .filter(|a| a.is_correct)
        .map(|a| a.text.as_str())
        .collect();
    assert_eq!(correct, vec!["<p>Mitochondrion</p>"]);

    // Plain-text true/false choices are normalized to HTML fragments.
    assert_eq!(quiz.questions[1].answers[0].text, "<p>True</p>");
}

#[test]
fn test_roundtrip_preserves_identity() {
    let original = load_fixture_quiz();
    let assessment_id = writer::assessment_identifier(&original);
    let xml = writer::generate_assessment_xml(&original, &assessment_id);
    let reparsed = parser::parse_document(&xml).unwrap();

    // The Canvas identifier is inherited, never regenerated.
    assert_eq!(assessment_id, "g8f2c1a9e4b7d3f6a0c5e8b1d4a7f2c3e");
    assert_eq!(reparsed.metadata, original.metadata);
    assert_eq!(reparsed.title, original.title);

    assert_eq!(reparsed.questions.len(), original.questions.len());
    for (before, after) in original.questions.iter().zip(&reparsed.questions) {
        assert_eq!(after.canvas_identifier(), before.canvas_identifier());
        assert_eq!(after.title(), before.title());
        assert_eq!(after.question_type, before.question_type);
        assert_eq!(after.question_text, before.question_text);
        assert_eq!(after.points, before.points);
        assert_eq!(after.metadata, before.metadata);

        assert_eq!(after.answers.len(), before.answers.len());
        for (a_before, a_after) in before.answers.iter().zip(&after.answers) {
            assert_eq!(a_after.canvas_identifier(), a_before.canvas_identifier());
            assert_eq!(a_after.text, a_before.text);
            assert_eq!(a_after.is_correct, a_before.is_correct);
        }
    }
}

#[test]
fn test_serialized_scoring_is_fixed_at_100() {
    let quiz = load_fixture_quiz();
    let xml = writer::generate_assessment_xml(&quiz, "g8f2c1a9e4b7d3f6a0c5e8b1d4a7f2c3e");

    // The 2-point and 5-point questions still score their correct answers
    // at 100; point values travel in points_possible instead.
    assert!(xml.contains(r#"<setvar action="Set" varname="SCORE">100</setvar>"#));
    assert!(!xml.contains(r#"varname="SCORE">200"#));
    assert!(xml.contains("<fieldentry>2.0</fieldentry>"));
    assert!(xml.contains("<fieldentry>5.0</fieldentry>"));
}

#[test]
fn test_write_package_layout_roundtrips() {
    let quiz = load_fixture_quiz();
    let out = tempfile::tempdir().unwrap();

    let package_dir = writer::write_package(&quiz, out.path()).unwrap();
    let quiz_dir = package_dir.join("g8f2c1a9e4b7d3f6a0c5e8b1d4a7f2c3e");

    assert!(package_dir.join("imsmanifest.xml").is_file());
    assert!(quiz_dir.join("g8f2c1a9e4b7d3f6a0c5e8b1d4a7f2c3e.xml").is_file());
    assert!(quiz_dir.join("assessment_meta.xml").is_file());

    // The written package can itself be located and imported again.
    let located = locate_assessment_file(&package_dir).unwrap();
    let bytes = fs::read(located).unwrap();
    let reimported = parser::parse_bytes(&bytes).unwrap();
    assert_eq!(reimported.title, quiz.title);
    assert_eq!(reimported.questions.len(), 3);
}

#[test]
fn test_search_over_imported_document() {
    let quiz = load_fixture_quiz();
    let current = quiz.questions[0].id.clone();

    let options = SearchOptions {
        case_sensitive: false,
        ..SearchOptions::literal("photosynthesis")
    };
    // Title and body of the true/false question.
    let matches = search_document(&quiz, &options).unwrap();
    assert_eq!(matches.len(), 2);

    let options = SearchOptions {
        pattern: r"\b[Cc]hloroplast\b".to_string(),
        regex: true,
        case_sensitive: true,
        scope: SearchScope::AllQuestions,
        field: FieldFilter::QuestionText,
        current_question_id: Some(current),
    };
    let matches = search_document(&quiz, &options).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].matched_text, "chloroplast");
    // Context snippets carry no HTML markup.
    assert!(!matches[0].context.contains('<'));
}

#[test]
fn test_questions_keep_document_order() {
    let quiz = load_fixture_quiz();
    let idents: Vec<_> = quiz
        .questions
        .iter()
        .filter_map(Question::canvas_identifier)
        .collect();
    assert_eq!(
        idents,
        vec![
            "g5b8e1d4a7c0f3b6e9d2a5c8f1b4e7d0a",
            "g2c5f8b1e4a7d0c3f6b9e2a5d8c1f4b7e",
            "g9d2a5f8c1e4b7a0d3f6c9b2e5a8d1f4c"
        ]
    );
}
