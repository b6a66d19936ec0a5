/// Renderer configuration - capacities, circle quality and shader paths

use crate::error::{Error, Result};
use crate::geometry::{QUAD_INDEX_COUNT, QUAD_VERTEX_COUNT};

/// Default number of quads one 2D batch holds before it is flushed
pub const DEFAULT_MAX_QUADS: usize = 100_000;

/// Hardware texture-unit ceiling, and the default slot-table size
pub const MAX_TEXTURE_SLOTS: usize = 32;

/// Default number of rotated quads emitted per circle
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 100;

/// Default rotation between successive circle quads, in degrees
pub const DEFAULT_CIRCLE_STEP_DEGREES: f32 = 1.0;

/// What the 2D batch does when a new texture finds every slot taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureExhaustion {
    /// Flush the batch mid-scene and retry the texture in a fresh table
    #[default]
    Flush,
    /// Fail the draw with `Error::TextureSlotsExhausted` and abort the scene
    Reject,
}

/// Batch renderer configuration
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Quads per 2D batch (vertex arena holds `max_quads * 4` vertices)
    pub max_quads: usize,
    /// Size of the texture-slot table, slot 0 included
    pub max_texture_slots: usize,
    /// Rotated quads emitted per circle
    pub circle_segments: u32,
    /// Rotation between successive circle quads, in degrees
    pub circle_step_degrees: f32,
    /// Shader used by the 2D quad batch
    pub texture_shader_path: String,
    /// Shader used by the 3D model batch
    pub lighting_shader_path: String,
    /// Slot-table exhaustion policy
    pub texture_exhaustion: TextureExhaustion,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_quads: DEFAULT_MAX_QUADS,
            max_texture_slots: MAX_TEXTURE_SLOTS,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            circle_step_degrees: DEFAULT_CIRCLE_STEP_DEGREES,
            texture_shader_path: "assets/shaders/Texture.glsl".to_string(),
            lighting_shader_path: "assets/shaders/Lighting.glsl".to_string(),
            texture_exhaustion: TextureExhaustion::Flush,
        }
    }
}

impl RendererConfig {
    /// Vertices in the 2D arena
    pub fn max_vertices(&self) -> usize {
        self.max_quads * QUAD_VERTEX_COUNT
    }

    /// Indices in one full 2D batch
    pub fn max_indices(&self) -> usize {
        self.max_quads * QUAD_INDEX_COUNT
    }

    /// Check the configuration before anything is allocated on the device
    pub fn validate(&self) -> Result<()> {
        if self.max_quads == 0 {
            return Err(Error::InvalidConfig("max_quads must be at least 1".to_string()));
        }
        // Vertex indices are uploaded as u32
        let max_vertices = self.max_quads.checked_mul(QUAD_VERTEX_COUNT);
        if max_vertices.map_or(true, |count| count > u32::MAX as usize) {
            return Err(Error::InvalidConfig(format!(
                "max_quads {} overflows 32-bit vertex indices",
                self.max_quads
            )));
        }
        if self.max_texture_slots < 2 {
            return Err(Error::InvalidConfig(format!(
                "max_texture_slots must be at least 2 (slot 0 is reserved), got {}",
                self.max_texture_slots
            )));
        }
        if self.max_texture_slots > MAX_TEXTURE_SLOTS {
            return Err(Error::InvalidConfig(format!(
                "max_texture_slots {} exceeds the hardware ceiling of {}",
                self.max_texture_slots, MAX_TEXTURE_SLOTS
            )));
        }
        if self.circle_segments == 0 {
            return Err(Error::InvalidConfig("circle_segments must be at least 1".to_string()));
        }
        if !self.circle_step_degrees.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "circle_step_degrees must be finite, got {}",
                self.circle_step_degrees
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
