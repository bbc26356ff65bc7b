//! Append-only vertex/index accumulation and the finished mesh buffers.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::theme::ColorRGBA;

/// One record of the output vertex buffer, 12 floats wide:
/// position.xyz, color.rgba, normal.xyz, uv.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: Vec3, color: ColorRGBA, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.into(),
            color,
            normal: normal.into(),
            uv: uv.into(),
        }
    }
}

/// Collects vertices and triangles for one generation pass.
///
/// Vertices are never shared between polygons, so coincident vertices along
/// shared edges are expected.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Append a vertex and return its index. Indices wrap past `u32::MAX`;
    /// callers check [`Self::vertices`] before trusting the index buffer.
    pub fn add_vertex(&mut self, position: Vec3, color: ColorRGBA, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex::new(position, color, normal, uv));
        index
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend([i0, i1, i2]);
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Flatten into upload-ready buffers. No validation is performed.
    pub fn finalize(self) -> TerrainMesh {
        TerrainMesh {
            vertex_count: self.vertices.len() as u32,
            vertices: bytemuck::cast_slice::<MeshVertex, f32>(&self.vertices).to_vec(),
            indices: self.indices,
        }
    }
}

/// Finished terrain buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    pub vertex_count: u32,
    /// `vertex_count * STRIDE` floats.
    pub vertices: Vec<f32>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Floats per vertex.
    pub const STRIDE: usize = 12;
    pub const POSITION_OFFSET: usize = 0;
    pub const COLOR_OFFSET: usize = 3;
    pub const NORMAL_OFFSET: usize = 7;
    pub const UV_OFFSET: usize = 10;

    /// (vertex count, float vertex buffer, index buffer).
    pub fn into_parts(self) -> (u32, Vec<f32>, Vec<u32>) {
        (self.vertex_count, self.vertices, self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// View the float buffer as vertex records. Empty if the buffer length is
    /// not a multiple of [`Self::STRIDE`].
    pub fn mesh_vertices(&self) -> &[MeshVertex] {
        bytemuck::try_cast_slice(&self.vertices).unwrap_or(&[])
    }

    pub fn vertex(&self, index: usize) -> Option<&MeshVertex> {
        self.mesh_vertices().get(index)
    }

    /// Axis-aligned bounds of all positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.mesh_vertices().iter().fold(None, |acc, v| {
            let p = Vec3::from(v.position);
            Some(match acc {
                Some((min, max)) => (min.min(p), max.max(p)),
                None => (p, p),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_record_is_twelve_floats() {
        assert_eq!(
            std::mem::size_of::<MeshVertex>(),
            TerrainMesh::STRIDE * std::mem::size_of::<f32>()
        );
    }

    #[test]
    fn indices_are_handed_out_in_order() {
        let mut builder = MeshBuilder::new();
        let white = [1.0; 4];
        let a = builder.add_vertex(Vec3::ZERO, white, Vec3::Z, Vec2::ZERO);
        let b = builder.add_vertex(Vec3::X, white, Vec3::Z, Vec2::X);
        let c = builder.add_vertex(Vec3::Y, white, Vec3::Z, Vec2::Y);
        assert_eq!((a, b, c), (0, 1, 2));
        builder.add_triangle(a, b, c);
        assert_eq!(builder.vertex_count(), 3);
        assert_eq!(builder.indices(), &[0, 1, 2]);
    }

    #[test]
    fn finalize_packs_position_color_normal_uv() {
        let mut builder = MeshBuilder::new();
        builder.add_vertex(
            Vec3::new(1.0, 2.0, 3.0),
            [0.1, 0.2, 0.3, 0.4],
            Vec3::new(0.0, 0.0, 1.0),
            Vec2::new(0.5, 0.75),
        );
        assert!(MeshBuilder::new().finalize().is_empty());
        let mesh = builder.finalize();
        assert!(!mesh.is_empty());
        assert_eq!(mesh.vertex_count, 1);
        assert_eq!(
            mesh.vertices,
            vec![1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 0.4, 0.0, 0.0, 1.0, 0.5, 0.75]
        );
        assert_eq!(mesh.vertices[TerrainMesh::UV_OFFSET], 0.5);
        assert_eq!(mesh.vertex(0).unwrap().normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn bounds_cover_every_position() {
        let mut builder = MeshBuilder::new();
        for p in [Vec3::new(-1.0, 2.0, 0.5), Vec3::new(3.0, -4.0, 0.0)] {
            builder.add_vertex(p, [1.0; 4], Vec3::Z, Vec2::ZERO);
        }
        let mesh = builder.finalize();
        assert_eq!(
            mesh.bounds(),
            Some((Vec3::new(-1.0, -4.0, 0.0), Vec3::new(3.0, 2.0, 0.5)))
        );
        assert_eq!(TerrainMesh::default().bounds(), None);
    }
}
