/// Buffer trait and buffer descriptor

use crate::error::Result;

/// Buffer usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Vertex buffer
    Vertex,
    /// Index buffer (always 32-bit indices)
    Index,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
    /// Optional initial contents (must not exceed `size`)
    pub data: Option<Vec<u8>>,
}

impl BufferDesc {
    /// Descriptor for a dynamic vertex buffer filled later with `Buffer::update`
    pub fn dynamic_vertex(size: u64) -> Self {
        Self { size, usage: BufferUsage::Vertex, data: None }
    }

    /// Descriptor for a vertex buffer created from existing bytes
    pub fn vertex_with_data(data: Vec<u8>) -> Self {
        Self { size: data.len() as u64, usage: BufferUsage::Vertex, data: Some(data) }
    }

    /// Descriptor for an index buffer created from 32-bit indices
    pub fn index_with_data(indices: &[u32]) -> Self {
        let data = bytemuck::cast_slice::<u32, u8>(indices).to_vec();
        Self { size: data.len() as u64, usage: BufferUsage::Index, data: Some(data) }
    }
}

/// Buffer data format for vertex attributes
///
/// Defines the data type and component count of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum BufferFormat {
    R32_SFLOAT,          // float (4 bytes)
    R32G32_SFLOAT,       // vec2 (8 bytes)
    R32G32B32_SFLOAT,    // vec3 (12 bytes)
    R32G32B32A32_SFLOAT, // vec4 (16 bytes)
}

impl BufferFormat {
    /// Returns size in bytes for this format
    pub fn size_bytes(&self) -> u32 {
        self.component_count() * 4
    }

    /// Number of f32 components
    pub fn component_count(&self) -> u32 {
        match self {
            BufferFormat::R32_SFLOAT => 1,
            BufferFormat::R32G32_SFLOAT => 2,
            BufferFormat::R32G32B32_SFLOAT => 3,
            BufferFormat::R32G32B32A32_SFLOAT => 4,
        }
    }
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types.
/// The buffer is automatically destroyed when dropped.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Usage the buffer was created with
    fn usage(&self) -> BufferUsage;

    /// Update buffer data
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset into the buffer in bytes
    /// * `data` - Data to write
    ///
    /// # Errors
    ///
    /// Backends must reject writes past the end of the buffer.
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;
}
