/// 2D batch storage - quad vertex arena, index counter and texture slots.
///
/// Everything on the device side is allocated once in `new`: the dynamic
/// vertex buffer sized for `max_quads * 4` vertices, the index buffer
/// precomputed with the `0,1,2,2,3,0` pattern for every quad, the vertex
/// array tying them together and the 1x1 white placeholder texture.
/// Scenes only rewind cursors.

use std::sync::Arc;

use crate::config::RendererConfig;
use crate::error::Result;
use crate::geometry::{QuadVertex, QUAD_INDEX_COUNT, QUAD_INDEX_PATTERN, QUAD_VERTEX_COUNT};
use crate::graphics_device::{
    GraphicsDevice, Buffer, Texture, VertexArray,
    BufferDesc, TextureDesc, TextureFormat, VertexArrayDesc,
};
use crate::storage::{TextureSlots, VertexArena};

/// Pixel of the placeholder texture bound to slot 0 (opaque white)
pub const WHITE_PIXEL: u32 = 0xffff_ffff;

pub struct QuadBatch {
    arena: VertexArena<QuadVertex>,
    index_count: usize,
    max_indices: usize,
    texture_slots: TextureSlots,
    vertex_buffer: Arc<dyn Buffer>,
    vertex_array: Arc<dyn VertexArray>,
}

impl QuadBatch {
    /// Allocate the 2D batch on `device`
    pub fn new(device: &mut dyn GraphicsDevice, config: &RendererConfig) -> Result<Self> {
        let layout = QuadVertex::layout();
        let vertex_buffer = device.create_buffer(BufferDesc::dynamic_vertex(
            config.max_vertices() as u64 * layout.stride as u64,
        ))?;

        let indices = quad_indices(config.max_quads);
        let index_buffer = device.create_buffer(BufferDesc::index_with_data(&indices))?;

        let vertex_array = device.create_vertex_array(VertexArrayDesc {
            name: "QuadBatch".to_string(),
            vertex_buffer: Arc::clone(&vertex_buffer),
            layout,
            index_buffer: Some(index_buffer),
        })?;

        let white = device.create_texture(TextureDesc {
            name: "White".to_string(),
            width: 1,
            height: 1,
            format: TextureFormat::R8G8B8A8_UNORM,
            data: Some(WHITE_PIXEL.to_le_bytes().to_vec()),
        })?;

        Ok(Self {
            arena: VertexArena::new(config.max_vertices()),
            index_count: 0,
            max_indices: config.max_indices(),
            texture_slots: TextureSlots::new(white, config.max_texture_slots),
            vertex_buffer,
            vertex_array,
        })
    }

    /// Whether another quad needs a flush first
    pub fn is_full(&self) -> bool {
        self.index_count >= self.max_indices
    }

    /// Append the four corners of one quad.
    ///
    /// Returns `false` and writes nothing when the batch is full.
    pub fn push_quad(&mut self, corners: &[QuadVertex; QUAD_VERTEX_COUNT]) -> bool {
        if self.is_full() || !self.arena.extend_from_slice(corners) {
            return false;
        }
        self.index_count += QUAD_INDEX_COUNT;
        true
    }

    /// Slot index of `texture`, see `TextureSlots::resolve`
    pub fn resolve_texture(&mut self, texture: &Arc<dyn Texture>) -> Result<usize> {
        self.texture_slots.resolve(texture)
    }

    /// Bind slots `0..len` of the slot table, placeholder first.
    ///
    /// Both primitive families sample through this table, so it is bound
    /// even when no quad was written.
    pub fn bind_texture_slots(&self, device: &mut dyn GraphicsDevice) -> Result<()> {
        for (slot, texture) in self.texture_slots.bound().iter().enumerate() {
            device.bind_texture(slot as u32, texture)?;
        }
        Ok(())
    }

    /// Upload written vertices and issue one indexed draw.
    ///
    /// Does nothing when no quad was written. The caller binds the shader and
    /// the texture slots. Cursors are left untouched; call `reset` afterwards.
    pub fn flush(&self, device: &mut dyn GraphicsDevice) -> Result<bool> {
        if self.index_count == 0 {
            return Ok(false);
        }
        self.vertex_buffer.update(0, self.arena.as_bytes())?;
        device.draw_indexed(&self.vertex_array, self.index_count as u32)?;
        Ok(true)
    }

    /// Rewind the vertex cursor, the index count and the slot table
    pub fn reset(&mut self) {
        self.arena.reset();
        self.index_count = 0;
        self.texture_slots.reset();
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn max_indices(&self) -> usize {
        self.max_indices
    }

    pub fn quad_count(&self) -> usize {
        self.index_count / QUAD_INDEX_COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }

    /// Vertices written since the last reset
    pub fn vertices(&self) -> &[QuadVertex] {
        self.arena.as_slice()
    }

    pub fn texture_slots(&self) -> &TextureSlots {
        &self.texture_slots
    }

    pub fn vertex_array(&self) -> &Arc<dyn VertexArray> {
        &self.vertex_array
    }
}

/// Index list for `max_quads` quads: `0,1,2,2,3,0` offset by 4 per quad
pub fn quad_indices(max_quads: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(max_quads * QUAD_INDEX_COUNT);
    for quad in 0..max_quads {
        let base = (quad * QUAD_VERTEX_COUNT) as u32;
        indices.extend(QUAD_INDEX_PATTERN.iter().map(|&i| base + i));
    }
    indices
}

#[cfg(test)]
#[path = "quad_batch_tests.rs"]
mod tests;
