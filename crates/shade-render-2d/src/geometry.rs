//! Geometry handed to the vertex stage.
//!
//! Tessellation happens upstream. This module only defines the mesh container
//! and the lyon vertex constructors that emit [`Vertex`] records directly.

use lyon::tessellation::{
    FillVertex, FillVertexConstructor, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};
use shade_core::{Color, Vertex};

/// Tessellated mesh ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Append tessellator output, rebasing its indices onto this mesh.
    pub fn append(&mut self, buffers: VertexBuffers<Vertex, u32>) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(buffers.vertices);
        self.indices.extend(buffers.indices.iter().map(|i| i + base));
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }
}

impl From<VertexBuffers<Vertex, u32>> for Mesh {
    fn from(buffers: VertexBuffers<Vertex, u32>) -> Self {
        Self {
            vertices: buffers.vertices,
            indices: buffers.indices,
        }
    }
}

/// Vertex constructor stamping a flat color and depth onto tessellator output.
#[derive(Debug, Clone, Copy)]
pub struct ShapeVertex {
    pub color: Color,
    pub z: f32,
}

impl ShapeVertex {
    pub fn new(color: Color) -> Self {
        Self { color, z: 0.0 }
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }
}

impl FillVertexConstructor<Vertex> for ShapeVertex {
    fn new_vertex(&mut self, vertex: FillVertex) -> Vertex {
        let p = vertex.position();
        Vertex::new([p.x, p.y, self.z], self.color)
    }
}

impl StrokeVertexConstructor<Vertex> for ShapeVertex {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> Vertex {
        let p = vertex.position();
        Vertex::new([p.x, p.y, self.z], self.color)
    }
}
