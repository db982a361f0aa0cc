use std::path::PathBuf;

use crate::capability::BoxError;

/// Errors raised while reading a manifest or class name file.
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("Manifest file does not exist: {0}")]
    FileNotFound(PathBuf),

    /// The manifest file exists but could not be read.
    #[error("Failed to read the manifest. {0}")]
    Io(#[from] std::io::Error),

    /// A row does not have exactly two columns.
    #[error("Manifest row at line {line} has {columns} columns, expected 2")]
    MalformedRow {
        /// 1-based line number.
        line: usize,
        /// Number of columns found.
        columns: usize,
    },

    /// A label is not a 32-bit integer.
    #[error("Invalid label at line {line}: {value}")]
    InvalidLabel {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        value: String,
    },

    /// The manifest has no rows.
    #[error("Manifest has no entries: {0}")]
    EmptyManifest(PathBuf),
}

/// Errors raised by a [`SampleCollection`](crate::SampleCollection).
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The collection could not be built from its manifest.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The index is not smaller than the number of samples.
    #[error("Index {index} is out of range for a collection of {len} samples")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of samples.
        len: usize,
    },

    /// The loader failed for a sample.
    #[error("Failed to load sample {path}. {source}")]
    SampleLoad {
        /// Resolved sample path.
        path: PathBuf,
        /// Loader error.
        source: BoxError,
    },

    /// The preprocessing step failed for a sample.
    #[error("Failed to preprocess sample {path}. {source}")]
    Preprocess {
        /// Resolved sample path.
        path: PathBuf,
        /// Preprocessing error.
        source: BoxError,
    },
}
