mod parser;
mod properties;
mod writer;

use std::path::{Path, PathBuf};

pub use parser::*;
pub use properties::*;
pub use writer::*;

use crate::mesh::{MeshError, TriMesh};

/// Error types for the PLY module.
#[derive(Debug, thiserror::Error)]
pub enum PlyError {
    /// Failed to read or write the PLY file
    #[error("Failed to read PLY file")]
    Io(#[from] std::io::Error),

    /// Malformed PLY header
    #[error("Invalid PLY header: {0}")]
    InvalidHeader(String),

    /// Unsupported PLY property type
    #[error("Unsupported PLY property type: {0}")]
    UnsupportedProperty(String),

    /// A property the mesh needs is missing
    #[error("Missing PLY property: {0}")]
    MissingProperty(&'static str),

    /// A body value could not be parsed
    #[error("Invalid PLY value in element {element}: {value}")]
    InvalidValue {
        /// Element being parsed.
        element: String,
        /// Offending token.
        value: String,
    },

    /// A face is not a triangle
    #[error("Face {face} has {len} vertices, only triangles are supported")]
    NonTriangularFace {
        /// Index of the face.
        face: usize,
        /// Number of vertex indices.
        len: usize,
    },

    /// The file does not have a `.ply` extension
    #[error("Unsupported mesh file extension: {0}")]
    UnsupportedExtension(PathBuf),

    /// The decoded mesh is inconsistent
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

fn check_extension(path: &Path) -> Result<(), PlyError> {
    let is_ply = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ply"));

    if !is_ply {
        return Err(PlyError::UnsupportedExtension(path.to_path_buf()));
    }

    Ok(())
}

/// Load a mesh file, dispatching on the file extension.
///
/// Only `.ply` files are supported.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<TriMesh, PlyError> {
    let path = path.as_ref();
    check_extension(path)?;
    read_ply_mesh(path)
}

/// Save a mesh file, dispatching on the file extension.
///
/// Only `.ply` files are supported; they are written in ASCII.
pub fn save_mesh(path: impl AsRef<Path>, mesh: &TriMesh) -> Result<(), PlyError> {
    let path = path.as_ref();
    check_extension(path)?;
    write_ply_mesh(path, mesh, PlyFormat::Ascii)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_extension_dispatch() -> Result<(), PlyError> {
        let tmp_dir = tempfile::tempdir()?;
        let mesh = TriMesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            None,
            vec![[0, 1, 2]],
        )?;

        let path = tmp_dir.path().join("triangle.PLY");
        save_mesh(&path, &mesh)?;
        assert_eq!(load_mesh(&path)?, mesh);

        let res = save_mesh(tmp_dir.path().join("triangle.obj"), &mesh);
        assert!(matches!(res, Err(PlyError::UnsupportedExtension(_))));

        let res = load_mesh(tmp_dir.path().join("triangle"));
        assert!(matches!(res, Err(PlyError::UnsupportedExtension(_))));

        Ok(())
    }
}
