#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Vector norms, camera poses and sphere sampling.
pub mod geometry;

/// I/O utilities for reading and writing 3D data.
pub mod io;

/// Triangle mesh container.
pub mod mesh;
