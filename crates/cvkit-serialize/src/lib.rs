#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for serialization.
pub mod error;

/// File format detection from the extension.
pub mod format;

/// NumPy `.npy` arrays.
pub mod npy;

/// NumPy `.npz` archives of named arrays.
pub mod npz;

/// Whitespace separated text matrices.
pub mod txt;

/// YAML documents.
pub mod yaml;

mod data;

pub use crate::data::{load, save, Data};
pub use crate::error::SerializeError;
pub use crate::format::Format;
pub use crate::npy::{load_npy, save_npy};
pub use crate::npz::{load_npz, save_npz, NpzArchive};
pub use crate::txt::{load_txt, save_txt};
pub use crate::yaml::{load_yaml, save_yaml};
