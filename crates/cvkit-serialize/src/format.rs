use std::path::Path;

use crate::error::SerializeError;

/// File formats recognised from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Whitespace separated text matrix (`.txt`).
    Txt,
    /// YAML document (`.yml`, `.yaml`).
    Yaml,
    /// NumPy array (`.npy`).
    Npy,
    /// NumPy zip archive (`.npz`).
    Npz,
    /// MATLAB file (`.mat`).
    Mat,
}

impl Format {
    /// Detect the format from the extension of `path`, ignoring case.
    ///
    /// # Example
    ///
    /// ```
    /// use cvkit_serialize::Format;
    ///
    /// assert_eq!(Format::from_path("poses.YML").unwrap(), Format::Yaml);
    /// assert!(Format::from_path("poses.json").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SerializeError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("txt") => Ok(Format::Txt),
            Some("yml") | Some("yaml") => Ok(Format::Yaml),
            Some("npy") => Ok(Format::Npy),
            Some("npz") => Ok(Format::Npz),
            Some("mat") => Ok(Format::Mat),
            _ => Err(SerializeError::UnknownExtension(path.to_path_buf())),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Txt => "txt",
            Format::Yaml => "yaml",
            Format::Npy => "npy",
            Format::Npz => "npz",
            Format::Mat => "mat",
        };
        write!(f, "{name}")
    }
}
