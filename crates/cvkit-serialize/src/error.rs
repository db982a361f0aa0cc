use std::path::PathBuf;

use crate::format::Format;

/// An error type for the serialize module.
#[derive(thiserror::Error, Debug)]
pub enum SerializeError {
    /// Failed to read or write the file.
    #[error("Failed to manipulate the file. {0}")]
    Io(#[from] std::io::Error),

    /// The extension does not name a known format.
    #[error("Unknown file extension: {0}")]
    UnknownExtension(PathBuf),

    /// The format is recognised but cannot be read or written.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(Format),

    /// The data variant cannot be stored in the requested format.
    #[error("Cannot store {data} data as {format}")]
    DataMismatch {
        /// Kind of data that was passed.
        data: &'static str,
        /// Requested format.
        format: Format,
    },

    /// YAML encoding or decoding failed.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// A text row has a different number of columns than the first row.
    #[error("Row at line {line} has {found} columns, expected {expected}")]
    MalformedRow {
        /// 1-based line number.
        line: usize,
        /// Columns of the first row.
        expected: usize,
        /// Columns of this row.
        found: usize,
    },

    /// A text value is not a number.
    #[error("Invalid number at line {line}: {value}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        value: String,
    },

    /// The NPY preamble or header dictionary is malformed.
    #[error("Invalid NPY header: {0}")]
    InvalidNpyHeader(String),

    /// The NPY dtype is not supported.
    #[error("Unsupported NPY dtype: {0}")]
    UnsupportedDtype(String),

    /// The array has a shape the format cannot hold.
    #[error("Unsupported array shape: {0:?}")]
    UnsupportedShape(Vec<usize>),

    /// The NPZ archive could not be read or written.
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    /// The decoded values do not fit the declared shape.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
