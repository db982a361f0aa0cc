#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Pluggable sample loading and preprocessing.
pub mod capability;

/// The sample collection.
pub mod collection;

/// Serde configuration to open a collection.
pub mod config;

/// Error types for manifests and sample access.
pub mod error;

/// Manifest and class name files.
pub mod manifest;

pub use crate::capability::{BoxError, Identity, LoadSample, Preprocess, RgbImageLoader};
pub use crate::collection::SampleCollection;
pub use crate::config::DatasetConfig;
pub use crate::error::{DatasetError, ManifestError};
pub use crate::manifest::{load_class_names, read_manifest, Label, ManifestEntry};
