use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;

/// Integer class index of a sample.
pub type Label = i32;

/// Name of the optional file listing one class name per line.
pub const CLASS_NAMES_FILE: &str = "label.txt";

/// One manifest row: the resolved sample path and its class label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestEntry {
    /// Sample path, already joined with the collection base path.
    pub path: PathBuf,
    /// Class label.
    pub label: Label,
}

/// Path of the manifest for `mode`, i.e. `<base_path>/<mode>.txt`.
pub fn manifest_path(base_path: &Path, mode: &str) -> PathBuf {
    base_path.join(format!("{mode}.txt"))
}

fn read_to_string(path: &Path) -> Result<String, ManifestError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ManifestError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse manifest rows from a reader.
///
/// Each non blank row holds a path and an integer label separated by
/// whitespace; anything after `#` is a comment. Paths are joined with
/// `base_path` without touching the filesystem.
pub fn parse_manifest<R: BufRead>(
    reader: R,
    base_path: &Path,
) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut entries = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or("");
        let columns = content.split_whitespace().collect::<Vec<_>>();

        match columns.as_slice() {
            [] => continue,
            [path, label] => {
                let label = label
                    .parse::<Label>()
                    .map_err(|_| ManifestError::InvalidLabel {
                        line: i + 1,
                        value: label.to_string(),
                    })?;
                entries.push(ManifestEntry {
                    path: base_path.join(path),
                    label,
                });
            }
            _ => {
                return Err(ManifestError::MalformedRow {
                    line: i + 1,
                    columns: columns.len(),
                })
            }
        }
    }

    Ok(entries)
}

/// Read the manifest `<base_path>/<mode>.txt`.
///
/// Fails with [`ManifestError::EmptyManifest`] when the file has no rows.
pub fn read_manifest(
    base_path: impl AsRef<Path>,
    mode: &str,
) -> Result<Vec<ManifestEntry>, ManifestError> {
    let base_path = base_path.as_ref();
    let path = manifest_path(base_path, mode);

    let text = read_to_string(&path)?;
    let entries = parse_manifest(text.as_bytes(), base_path)?;
    if entries.is_empty() {
        return Err(ManifestError::EmptyManifest(path));
    }

    log::debug!("read {} entries from {}", entries.len(), path.display());

    Ok(entries)
}

/// Read the class names stored in `<base_path>/label.txt`, one per line.
///
/// The name on line `i` is the name of label `i`. Blank lines are skipped.
pub fn load_class_names(base_path: impl AsRef<Path>) -> Result<Vec<String>, ManifestError> {
    let path = base_path.as_ref().join(CLASS_NAMES_FILE);
    let text = read_to_string(&path)?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}
