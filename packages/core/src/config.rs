//! Configuration constants and identifier generation for the quiz core.

use uuid::Uuid;

/// QTI 1.2 namespace used by Canvas assessment exports.
pub const QTI_NAMESPACE: &str = "http://www.imsglobal.org/xsd/ims_qtiasiv1p2";

/// Schema location for the QTI 1.2 namespace.
pub const QTI_SCHEMA_LOCATION: &str =
    "http://www.imsglobal.org/xsd/ims_qtiasiv1p2 http://www.imsglobal.org/xsd/ims_qtiasiv1p2p1.xsd";

/// Canvas Common Cartridge extension namespace (quiz/assignment descriptors).
pub const CANVAS_NAMESPACE: &str = "http://canvas.instructure.com/xsd/cccv1p0";

/// IMS Content Packaging namespace for `imsmanifest.xml`.
pub const IMSCP_NAMESPACE: &str = "http://www.imsglobal.org/xsd/imsccv1p1/imscp_v1p1";

/// Resource type for a QTI 1.2 assessment inside a manifest.
pub const QTI_RESOURCE_TYPE: &str = "imsqti_xmlv1p2";

/// Resource type for Canvas associated content (the quiz descriptor).
pub const META_RESOURCE_TYPE: &str =
    "associatedcontent/imscc_xmlv1p1/learning-application-resource";

/// Number of characters of context shown on each side of a search match.
pub const CONTEXT_WINDOW: usize = 50;

/// Points assigned to a question when no positive scoring condition exists.
pub const DEFAULT_POINTS: f64 = 1.0;

/// Score emitted for every correct answer, regardless of question points.
///
/// Canvas grades these question types binary right/wrong against a 0-100
/// SCORE outcome and scales by `points_possible` on import.
pub const CORRECT_ANSWER_SCORE: f64 = 100.0;

/// Metadata keys the parser and serializer actively manage.
///
/// Every other key in a metadata map is an unknown Canvas extension field
/// and passes through the round-trip untouched.
pub mod keys {
    /// Stable Canvas identifier serialized into QTI `ident` attributes.
    pub const CANVAS_IDENTIFIER: &str = "canvas_identifier";

    /// Question title (the QTI item `title` attribute).
    pub const CANVAS_TITLE: &str = "canvas_title";

    /// External assignment id on the assessment element.
    pub const EXTERNAL_ASSIGNMENT_ID: &str = "external_assignment_id";

    /// Maximum attempts allowed (Common Cartridge extension field).
    pub const CC_MAXATTEMPTS: &str = "cc_maxattempts";
}

/// Generate a fresh Canvas-style identifier.
///
/// Canvas identifiers are a `g` prefix followed by 32 hex characters; a
/// hyphen-stripped UUID v4 matches that shape.
///
/// # Examples
/// ```
/// use quizpack_core::config::new_canvas_identifier;
///
/// let id = new_canvas_identifier();
/// assert_eq!(id.len(), 33);
/// assert!(id.starts_with('g'));
/// ```
#[must_use]
pub fn new_canvas_identifier() -> String {
    format!("g{}", Uuid::new_v4().simple())
}

/// Generate an ephemeral internal id for a question or answer.
///
/// Internal ids are UI-facing identity only and are never serialized; they
/// may be regenerated freely (e.g. on duplication) without affecting
/// round-trip correctness.
#[must_use]
pub fn new_internal_id() -> String {
    Uuid::new_v4().to_string()
}
