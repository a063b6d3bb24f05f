//! Result packaging.
//!
//! Bundles the serialized request record and every computation output into
//! a single zip archive, `<workdir>/<request_id>_output.zip`. Outputs are
//! stored under their base file names with directory components stripped;
//! what happens when two outputs share a base name is governed by an
//! explicit [`CollisionPolicy`] rather than silent overwriting.

use super::context::{RequestId, QUERY_RECORD_NAME};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// What to do when two outputs would occupy the same archive entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Fail the packaging step with [`PackageError::DuplicateEntry`].
    #[default]
    Reject,
    /// Keep the first entry as-is and suffix later duplicates with their
    /// zero-based position in the output list (`scene.tif` → `scene_1.tif`
    /// when the duplicate is the second output).
    IndexSuffix,
}

/// Errors from building the result package.
#[derive(Debug, Error)]
pub enum PackageError {
    /// Two outputs share a base file name under [`CollisionPolicy::Reject`].
    #[error("duplicate archive entry '{name}'")]
    DuplicateEntry { name: String },

    /// An output path has no base file name component.
    #[error("output path '{path}' has no file name")]
    InvalidOutput { path: String },

    /// Reading an output or writing the archive failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip container could not be written.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Builds the result package for one invocation.
///
/// The archive contains the request record (written beforehand to
/// `query.json` in the working directory) under that fixed entry name,
/// followed by each output in order under its base file name.
///
/// # Returns
///
/// The path of the archive, `<workdir>/<request_id>_output.zip`.
pub fn package_outputs(
    workdir: &Path,
    request_id: &RequestId,
    outputs: &[PathBuf],
    policy: CollisionPolicy,
) -> Result<PathBuf, PackageError> {
    let archive_path = workdir.join(format!("{}_output.zip", request_id));
    let mut writer = ZipWriter::new(File::create(&archive_path)?);
    let options = SimpleFileOptions::default();

    let record = fs::read(workdir.join(QUERY_RECORD_NAME))?;
    writer.start_file(QUERY_RECORD_NAME, options)?;
    writer.write_all(&record)?;

    let mut used: HashSet<String> = HashSet::new();
    used.insert(QUERY_RECORD_NAME.to_string());

    for (position, output) in outputs.iter().enumerate() {
        let base = output
            .file_name()
            .ok_or_else(|| PackageError::InvalidOutput {
                path: output.display().to_string(),
            })?
            .to_string_lossy()
            .into_owned();

        let entry = if used.contains(&base) {
            match policy {
                CollisionPolicy::Reject => {
                    return Err(PackageError::DuplicateEntry { name: base });
                }
                CollisionPolicy::IndexSuffix => indexed_name(&base, position),
            }
        } else {
            base
        };
        if !used.insert(entry.clone()) {
            return Err(PackageError::DuplicateEntry { name: entry });
        }

        let data = fs::read(output)?;
        writer.start_file(entry.as_str(), options)?;
        writer.write_all(&data)?;
    }

    writer.finish()?;
    debug!(path = %archive_path.display(), entries = outputs.len() + 1, "result package written");
    Ok(archive_path)
}

/// Disambiguates a colliding base name with the output's list position.
fn indexed_name(base: &str, position: usize) -> String {
    let path = Path::new(base);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => format!(
            "{}_{}.{}",
            stem.to_string_lossy(),
            position,
            ext.to_string_lossy()
        ),
        _ => format!("{}_{}", base, position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn entry_names(archive_path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
        archive.file_names().map(String::from).collect()
    }

    fn entry_content(archive_path: &Path, name: &str) -> Vec<u8> {
        let mut archive = ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        content
    }

    fn workdir_with_record() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(QUERY_RECORD_NAME), b"{\"task\":\"t\"}").unwrap();
        dir
    }

    #[test]
    fn test_roundtrip_record_plus_outputs_under_base_names() {
        let dir = workdir_with_record();
        let a = write_file(dir.path(), "extent.tif", b"tif-bytes");
        let b = write_file(dir.path(), "summary.csv", b"csv-bytes");

        let archive = package_outputs(
            dir.path(),
            &RequestId::new("req-9"),
            &[a, b],
            CollisionPolicy::Reject,
        )
        .unwrap();

        assert_eq!(archive, dir.path().join("req-9_output.zip"));
        let mut names = entry_names(&archive);
        names.sort();
        assert_eq!(names, vec!["extent.tif", "query.json", "summary.csv"]);
        assert_eq!(entry_content(&archive, "query.json"), b"{\"task\":\"t\"}");
        assert_eq!(entry_content(&archive, "extent.tif"), b"tif-bytes");
    }

    #[test]
    fn test_directory_components_are_stripped() {
        let dir = workdir_with_record();
        let nested = dir.path().join("deep").join("nested");
        fs::create_dir_all(&nested).unwrap();
        let output = write_file(&nested, "scene.tif", b"data");

        let archive = package_outputs(
            dir.path(),
            &RequestId::new("req-1"),
            &[output],
            CollisionPolicy::Reject,
        )
        .unwrap();

        assert!(entry_names(&archive).contains(&"scene.tif".to_string()));
    }

    #[test]
    fn test_collision_rejected_by_default_policy() {
        let dir = workdir_with_record();
        let first = write_file(dir.path(), "scene.tif", b"first");
        let other_dir = dir.path().join("other");
        fs::create_dir_all(&other_dir).unwrap();
        let second = write_file(&other_dir, "scene.tif", b"second");

        let err = package_outputs(
            dir.path(),
            &RequestId::new("req-2"),
            &[first, second],
            CollisionPolicy::Reject,
        )
        .unwrap_err();

        match err {
            PackageError::DuplicateEntry { name } => assert_eq!(name, "scene.tif"),
            other => panic!("expected DuplicateEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_collision_index_suffix_keeps_both_entries() {
        let dir = workdir_with_record();
        let first = write_file(dir.path(), "scene.tif", b"first");
        let other_dir = dir.path().join("other");
        fs::create_dir_all(&other_dir).unwrap();
        let second = write_file(&other_dir, "scene.tif", b"second");

        let archive = package_outputs(
            dir.path(),
            &RequestId::new("req-3"),
            &[first, second],
            CollisionPolicy::IndexSuffix,
        )
        .unwrap();

        let mut names = entry_names(&archive);
        names.sort();
        assert_eq!(names, vec!["query.json", "scene.tif", "scene_1.tif"]);
        assert_eq!(entry_content(&archive, "scene.tif"), b"first");
        assert_eq!(entry_content(&archive, "scene_1.tif"), b"second");
    }

    #[test]
    fn test_missing_output_file_is_io_error() {
        let dir = workdir_with_record();
        let missing = dir.path().join("never-written.tif");

        let err = package_outputs(
            dir.path(),
            &RequestId::new("req-4"),
            &[missing],
            CollisionPolicy::Reject,
        )
        .unwrap_err();

        assert!(matches!(err, PackageError::Io(_)));
    }
}
