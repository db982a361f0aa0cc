#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`](error::IoError) variants for file access and
/// encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image_any_rgb8`] for automatic format detection.
pub mod functional;

pub use crate::error::IoError;
pub use crate::functional::{
    read_image_any_gray8, read_image_any_rgb8, read_image_any_rgba8, read_image_rgb8_resized,
    write_image_gray8, write_image_rgb8, write_image_rgba8,
};
