//! FILENAME: core/scene-engine/src/mesh.rs
//! Batched vertex buffer for renderers that prefer a single mesh.
//!
//! Cuboids are concatenated with their triangle indices rebased; each
//! triangle remembers which cuboid it came from so hover lookups still
//! resolve to a single bar.

use serde::{Deserialize, Serialize};

use crate::cuboid::{CUBOID_TRIANGLE_COUNT, CUBOID_VERTEX_COUNT};
use crate::scene::Scene;

/// All cuboids of a scene in one triangle mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffer {
    pub vertices: Vec<[f64; 3]>,
    pub triangles: Vec<[u32; 3]>,
    pub intensity: Vec<f64>,
    /// `triangle_owner[t]` is the index of the cuboid triangle `t` belongs to.
    pub triangle_owner: Vec<u32>,
    /// Hover label per cuboid, indexed like `Scene::cuboids`.
    pub hover_text: Vec<String>,
}

impl MeshBuffer {
    pub fn empty() -> Self {
        MeshBuffer::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Hover label of the bar that owns triangle `t`.
    pub fn hover_for_triangle(&self, t: usize) -> Option<&str> {
        let owner = *self.triangle_owner.get(t)? as usize;
        self.hover_text.get(owner).map(String::as_str)
    }
}

impl Scene {
    /// Concatenates every cuboid into one buffer.
    pub fn mesh_buffer(&self) -> MeshBuffer {
        let n = self.cuboids.len();
        let mut buffer = MeshBuffer {
            vertices: Vec::with_capacity(n * CUBOID_VERTEX_COUNT),
            triangles: Vec::with_capacity(n * CUBOID_TRIANGLE_COUNT),
            intensity: Vec::with_capacity(n * CUBOID_VERTEX_COUNT),
            triangle_owner: Vec::with_capacity(n * CUBOID_TRIANGLE_COUNT),
            hover_text: Vec::with_capacity(n),
        };

        for (owner, cuboid) in self.cuboids.iter().enumerate() {
            let base = buffer.vertices.len() as u32;
            buffer.vertices.extend_from_slice(&cuboid.vertices);
            buffer.intensity.extend_from_slice(&cuboid.intensity);
            buffer
                .triangles
                .extend(cuboid.triangles.iter().map(|t| [t[0] + base, t[1] + base, t[2] + base]));
            buffer
                .triangle_owner
                .extend(std::iter::repeat(owner as u32).take(CUBOID_TRIANGLE_COUNT));
            buffer.hover_text.push(cuboid.hover_text.clone());
        }

        buffer
    }
}
