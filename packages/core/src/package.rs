//! IMSCC package import/export orchestration.
//!
//! Archive (ZIP) handling itself is not implemented here: the host supplies
//! an [`ArchiveHandler`] and this module drives it, reading or writing the
//! extracted directory through the QTI parser and writer. The handler works
//! against a private temporary directory that is cleaned up on every exit
//! path, success or error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{QuizpackError, Result};
use crate::qti::{parser, writer};
use crate::types::QuizDocument;

/// Archive collaborator contract.
///
/// Implementations wrap whatever archive library the host uses; extraction
/// and creation failures should surface as [`QuizpackError::Package`].
pub trait ArchiveHandler {
    /// Extract an archive into a private temporary directory.
    ///
    /// # Returns
    /// The directory the archive was extracted into.
    fn extract(&self, archive: &Path) -> Result<PathBuf>;

    /// Zip a package directory into an archive.
    ///
    /// # Returns
    /// The path of the created archive.
    fn create_package(&self, directory: &Path) -> Result<PathBuf>;

    /// Remove a temporary directory. Must tolerate being called on a
    /// directory that no longer exists.
    fn cleanup(&self, directory: &Path);

    /// Locate the assessment XML inside an extracted package directory.
    ///
    /// The default implementation uses [`locate_assessment_file`].
    fn locate_assessment_file(&self, directory: &Path) -> Result<PathBuf> {
        locate_assessment_file(directory)
    }
}

/// Locate the assessment XML inside an extracted package directory.
///
/// Canvas puts the assessment at `{subdir}/{subdir}.xml`; older exports
/// used `{subdir}/assessment.xml`. Subdirectories are checked in name order
/// so the result is deterministic when a package contains several.
///
/// # Errors
/// [`QuizpackError::Package`] when no assessment XML is found.
pub fn locate_assessment_file(directory: &Path) -> Result<PathBuf> {
    let mut subdirs: Vec<PathBuf> = fs::read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    for subdir in subdirs {
        if let Some(name) = subdir.file_name().and_then(|n| n.to_str()) {
            let current = subdir.join(format!("{name}.xml"));
            if current.is_file() {
                return Ok(current);
            }
        }
        let legacy = subdir.join("assessment.xml");
        if legacy.is_file() {
            return Ok(legacy);
        }
    }

    Err(QuizpackError::Package(format!(
        "no assessment XML found under {}",
        directory.display()
    )))
}

/// Import a quiz from an IMSCC archive.
///
/// Extracts the archive, locates and parses the assessment XML, and cleans
/// up the extraction directory whether or not parsing succeeded.
pub fn import_quiz(archive: &Path, handler: &impl ArchiveHandler) -> Result<QuizDocument> {
    let directory = handler.extract(archive)?;
    let result = (|| {
        let assessment_file = handler.locate_assessment_file(&directory)?;
        let bytes = fs::read(&assessment_file)?;
        parser::parse_bytes(&bytes)
    })();
    handler.cleanup(&directory);
    result
}

/// Export a quiz document to an IMSCC archive.
///
/// Writes the package directory layout into `staging_dir`, hands it to the
/// archive collaborator, and cleans the staging directory up whether or not
/// archive creation succeeded.
///
/// # Returns
/// The path of the created archive.
pub fn export_quiz(
    doc: &QuizDocument,
    staging_dir: &Path,
    handler: &impl ArchiveHandler,
) -> Result<PathBuf> {
    let result = writer::write_package(doc, staging_dir)
        .and_then(|package_dir| handler.create_package(&package_dir));
    handler.cleanup(staging_dir);
    result
}
