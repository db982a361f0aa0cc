/// Error types for mesh construction.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MeshError {
    /// A per-vertex attribute does not have one entry per vertex.
    #[error("Mesh has {expected} vertices but {found} {attribute}")]
    AttributeLengthMismatch {
        /// Name of the attribute.
        attribute: &'static str,
        /// Number of vertices.
        expected: usize,
        /// Number of attribute entries.
        found: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("Face {face} references vertex {index} but the mesh has {num_vertices} vertices")]
    FaceIndexOutOfRange {
        /// Index of the face.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices.
        num_vertices: usize,
    },
}

/// A triangle mesh with optional per-vertex normals and RGBA colors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriMesh {
    vertices: Vec<[f32; 3]>,
    normals: Option<Vec<[f32; 3]>>,
    colors: Option<Vec<[u8; 4]>>,
    faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Create a new mesh, checking that attributes and faces are consistent
    /// with the vertex list.
    pub fn new(
        vertices: Vec<[f32; 3]>,
        normals: Option<Vec<[f32; 3]>>,
        colors: Option<Vec<[u8; 4]>>,
        faces: Vec<[u32; 3]>,
    ) -> Result<Self, MeshError> {
        let num_vertices = vertices.len();

        if let Some(normals) = &normals {
            if normals.len() != num_vertices {
                return Err(MeshError::AttributeLengthMismatch {
                    attribute: "normals",
                    expected: num_vertices,
                    found: normals.len(),
                });
            }
        }

        if let Some(colors) = &colors {
            if colors.len() != num_vertices {
                return Err(MeshError::AttributeLengthMismatch {
                    attribute: "colors",
                    expected: num_vertices,
                    found: colors.len(),
                });
            }
        }

        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= num_vertices) {
                return Err(MeshError::FaceIndexOutOfRange {
                    face,
                    index,
                    num_vertices,
                });
            }
        }

        Ok(Self {
            vertices,
            normals,
            colors,
            faces,
        })
    }

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get the vertex positions.
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Get the vertex normals, if any.
    pub fn normals(&self) -> Option<&[[f32; 3]]> {
        self.normals.as_deref()
    }

    /// Get the vertex colors, if any.
    pub fn colors(&self) -> Option<&[[u8; 4]]> {
        self.colors.as_deref()
    }

    /// Get the triangle vertex indices.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimesh() -> Result<(), MeshError> {
        let mesh = TriMesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            Some(vec![[0.0, 0.0, 1.0]; 3]),
            None,
            vec![[0, 1, 2]],
        )?;

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.normals().map(|n| n.len()), Some(3));
        assert!(mesh.colors().is_none());

        Ok(())
    }

    #[test]
    fn test_trimesh_attribute_mismatch() {
        let res = TriMesh::new(
            vec![[0.0, 0.0, 0.0]; 3],
            None,
            Some(vec![[255, 0, 0, 255]; 2]),
            vec![],
        );
        assert_eq!(
            res,
            Err(MeshError::AttributeLengthMismatch {
                attribute: "colors",
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_trimesh_face_out_of_range() {
        let res = TriMesh::new(vec![[0.0, 0.0, 0.0]; 3], None, None, vec![[0, 1, 3]]);
        assert_eq!(
            res,
            Err(MeshError::FaceIndexOutOfRange {
                face: 0,
                index: 3,
                num_vertices: 3,
            })
        );
    }
}
