/// 3D batch storage - per-frame PolyVertex list and its compiled vertex array.
///
/// The list has no capacity ceiling and is rebuilt every scene. Compiling
/// uploads it as one interleaved vertex buffer (13 floats per vertex) and
/// remembers the vertex count for the next non-indexed draw.

use std::sync::Arc;

use crate::error::Result;
use crate::geometry::PolyVertex;
use crate::graphics_device::{GraphicsDevice, VertexArray};
use crate::model::compile_model;

#[derive(Default)]
pub struct PolyBatch {
    vertices: Vec<PolyVertex>,
    compiled: Option<Arc<dyn VertexArray>>,
    compiled_count: u32,
}

impl PolyBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-frame vertex list, appended to by the model loader
    pub fn vertices_mut(&mut self) -> &mut Vec<PolyVertex> {
        &mut self.vertices
    }

    pub fn vertices(&self) -> &[PolyVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Upload the accumulated list into a fresh vertex array
    pub fn compile(&mut self, device: &mut dyn GraphicsDevice) -> Result<Arc<dyn VertexArray>> {
        let vertex_array = compile_model(device, &self.vertices)?;
        let count = self.vertices.len() as u32;
        self.set_compiled(Arc::clone(&vertex_array), count);
        Ok(vertex_array)
    }

    /// Record a vertex array compiled elsewhere as the next one to draw
    pub fn set_compiled(&mut self, vertex_array: Arc<dyn VertexArray>, vertex_count: u32) {
        self.compiled = Some(vertex_array);
        self.compiled_count = vertex_count;
    }

    /// Vertex count recorded by the last compile, not yet consumed by a draw
    pub fn compiled_count(&self) -> u32 {
        self.compiled_count
    }

    /// Vertex array built by the last compile
    pub fn compiled(&self) -> Option<&Arc<dyn VertexArray>> {
        self.compiled.as_ref()
    }

    /// Hand out the compiled count and reset it to 0 (single-use)
    pub fn take_compiled_count(&mut self) -> u32 {
        std::mem::take(&mut self.compiled_count)
    }

    /// Compile and draw the list with one non-indexed call.
    ///
    /// Does nothing when the list is empty. The caller binds the shader.
    pub fn flush(&mut self, device: &mut dyn GraphicsDevice) -> Result<bool> {
        if self.vertices.is_empty() {
            return Ok(false);
        }
        let vertex_array = self.compile(device)?;
        let count = self.take_compiled_count();
        device.draw(&vertex_array, count)?;
        Ok(true)
    }

    /// Clear the per-frame list
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

#[cfg(test)]
#[path = "poly_batch_tests.rs"]
mod tests;
