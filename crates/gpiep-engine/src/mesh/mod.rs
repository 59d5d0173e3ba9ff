//! Static indexed meshes.
//!
//! A mesh is built once on the CPU, uploaded once, and never changes.

mod cube;
mod vertex;

use std::fmt;

pub use cube::{color_cube, textured_cube, CUBE_INDEX_COUNT, CUBE_INDICES, CUBE_VERTEX_COUNT};
pub use vertex::{ColorVertex, TexturedVertex, Vertex};

/// Error returned by [`Mesh::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshError(pub String);

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mesh: {}", self.0)
    }
}

impl std::error::Error for MeshError {}

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<V> {
    vertices: Vec<V>,
    indices: Vec<u32>,
}

impl<V> Mesh<V> {
    pub fn new(vertices: Vec<V>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Checks that the index list forms whole triangles over existing vertices.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError(format!(
                "{} indices do not form whole triangles",
                self.indices.len()
            )));
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= self.vertices.len()) {
            return Err(MeshError(format!(
                "index {bad} out of range for {} vertices",
                self.vertices.len()
            )));
        }
        Ok(())
    }
}
