/// Vertex array trait, vertex layout types and vertex array descriptor

use std::sync::Arc;
use crate::graphics_device::{Buffer, BufferFormat};

/// Vertex attribute description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute location in shader
    pub location: u32,
    /// Attribute name in shader (e.g. "a_Position")
    pub name: &'static str,
    /// Format of the attribute (data type and component count)
    pub format: BufferFormat,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

/// Interleaved vertex input layout (single binding, per-vertex rate)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexLayout {
    /// Stride in bytes between consecutive vertices
    pub stride: u32,
    /// Vertex attributes, in location order
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Build a tightly packed layout from `(name, format)` pairs.
    ///
    /// Locations follow declaration order and offsets accumulate, so the
    /// stride equals the sum of the attribute sizes.
    pub fn packed(attributes: &[(&'static str, BufferFormat)]) -> Self {
        let mut offset = 0;
        let attributes = attributes
            .iter()
            .enumerate()
            .map(|(location, &(name, format))| {
                let attribute = VertexAttribute {
                    location: location as u32,
                    name,
                    format,
                    offset,
                };
                offset += format.size_bytes();
                attribute
            })
            .collect();
        Self { stride: offset, attributes }
    }

    /// Stride expressed in f32 components
    pub fn float_stride(&self) -> u32 {
        self.stride / 4
    }
}

/// Descriptor for creating a vertex array
#[derive(Clone)]
pub struct VertexArrayDesc {
    /// Debug name
    pub name: String,
    /// Interleaved vertex data
    pub vertex_buffer: Arc<dyn Buffer>,
    /// Layout of one vertex in `vertex_buffer`
    pub layout: VertexLayout,
    /// Optional 32-bit index buffer
    pub index_buffer: Option<Arc<dyn Buffer>>,
}

/// Vertex array resource trait
///
/// Binds one vertex buffer, its layout and an optional index buffer.
pub trait VertexArray: Send + Sync {
    /// Debug name
    fn name(&self) -> &str;

    /// Layout of the bound vertex buffer
    fn layout(&self) -> &VertexLayout;

    /// Bound vertex buffer
    fn vertex_buffer(&self) -> &Arc<dyn Buffer>;

    /// Bound index buffer, if any
    fn index_buffer(&self) -> Option<&Arc<dyn Buffer>>;

    /// Number of indices in the bound index buffer (0 when non-indexed)
    fn index_count(&self) -> u32 {
        self.index_buffer()
            .map(|buffer| (buffer.size() / 4) as u32)
            .unwrap_or(0)
    }
}
