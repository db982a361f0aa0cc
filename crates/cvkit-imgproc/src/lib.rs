#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image blending and weighted sums.
pub mod enhance;

/// sub-pixel sampling.
pub mod interpolation;

/// operations to normalize images.
pub mod normalize;

/// rayon helpers over image buffers.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// rotation about the image centre.
pub mod warp;
