/// Draw requests - one tagged variant per primitive the renderer can batch

use std::fmt;
use std::sync::Arc;
use glam::{Vec2, Vec3, Vec4};

use crate::graphics_device::Texture;

/// Solid white, the default colour and tint
pub const WHITE: Vec4 = Vec4::ONE;

/// How a quad-family primitive is coloured
#[derive(Clone)]
pub enum Fill {
    /// Solid colour through the white placeholder in slot 0
    Color(Vec4),
    /// Texture sampled `tile_count` times across the quad, multiplied by `tint`
    Texture {
        texture: Arc<dyn Texture>,
        tile_count: f32,
        tint: Vec4,
    },
}

impl Fill {
    /// Solid colour fill
    pub fn color(color: Vec4) -> Self {
        Fill::Color(color)
    }

    /// Texture fill, untiled and untinted
    pub fn texture(texture: Arc<dyn Texture>) -> Self {
        Fill::Texture { texture, tile_count: 1.0, tint: WHITE }
    }

    /// Set the repeat factor (texture fills only)
    pub fn with_tile_count(mut self, count: f32) -> Self {
        if let Fill::Texture { tile_count, .. } = &mut self {
            *tile_count = count;
        }
        self
    }

    /// Set the tint (texture fills only)
    pub fn with_tint(mut self, color: Vec4) -> Self {
        if let Fill::Texture { tint, .. } = &mut self {
            *tint = color;
        }
        self
    }

    /// Colour written into every vertex
    pub fn vertex_color(&self) -> Vec4 {
        match self {
            Fill::Color(color) => *color,
            Fill::Texture { tint, .. } => *tint,
        }
    }

    /// Repeat factor written into every vertex
    pub fn tile_count(&self) -> f32 {
        match self {
            Fill::Color(_) => 1.0,
            Fill::Texture { tile_count, .. } => *tile_count,
        }
    }

    /// Texture to resolve into a slot, `None` for solid colours
    pub fn texture_handle(&self) -> Option<&Arc<dyn Texture>> {
        match self {
            Fill::Color(_) => None,
            Fill::Texture { texture, .. } => Some(texture),
        }
    }
}

impl fmt::Debug for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fill::Color(color) => f.debug_tuple("Color").field(color).finish(),
            Fill::Texture { texture, tile_count, tint } => f
                .debug_struct("Texture")
                .field("texture", &texture.id())
                .field("tile_count", tile_count)
                .field("tint", tint)
                .finish(),
        }
    }
}

/// A primitive to expand into batch storage
#[derive(Debug, Clone)]
pub enum DrawRequest {
    /// Axis-aligned quad centred on `position`
    Quad {
        position: Vec3,
        size: Vec2,
        fill: Fill,
    },
    /// Quad rotated by `rotation` radians about Z around its centre
    RotatedQuad {
        position: Vec3,
        size: Vec2,
        rotation: f32,
        fill: Fill,
    },
    /// Circle approximated by successive rotated quads
    Circle {
        position: Vec3,
        size: Vec2,
        fill: Fill,
    },
    /// Shape from the shape library, translated to `position`.
    ///
    /// `size` and `rotation` are carried for callers but not applied.
    Model {
        name: String,
        position: Vec3,
        size: Vec3,
        rotation: f32,
        color: Vec4,
        tex_id: f32,
    },
}

impl DrawRequest {
    pub fn quad(position: Vec3, size: Vec2, fill: Fill) -> Self {
        DrawRequest::Quad { position, size, fill }
    }

    /// Planar quad at z = 0
    pub fn quad_2d(position: Vec2, size: Vec2, fill: Fill) -> Self {
        Self::quad(position.extend(0.0), size, fill)
    }

    pub fn rotated_quad(position: Vec3, size: Vec2, rotation: f32, fill: Fill) -> Self {
        DrawRequest::RotatedQuad { position, size, rotation, fill }
    }

    /// Planar rotated quad at z = 0
    pub fn rotated_quad_2d(position: Vec2, size: Vec2, rotation: f32, fill: Fill) -> Self {
        Self::rotated_quad(position.extend(0.0), size, rotation, fill)
    }

    pub fn circle(position: Vec3, size: Vec2, fill: Fill) -> Self {
        DrawRequest::Circle { position, size, fill }
    }

    /// Planar circle at z = 0
    pub fn circle_2d(position: Vec2, size: Vec2, fill: Fill) -> Self {
        Self::circle(position.extend(0.0), size, fill)
    }

    /// Untransformed model with the given colour and texture index
    pub fn model(name: impl Into<String>, position: Vec3, color: Vec4, tex_id: f32) -> Self {
        DrawRequest::Model {
            name: name.into(),
            position,
            size: Vec3::ONE,
            rotation: 0.0,
            color,
            tex_id,
        }
    }

    /// Fill of a quad-family request, `None` for models
    pub fn fill(&self) -> Option<&Fill> {
        match self {
            DrawRequest::Quad { fill, .. }
            | DrawRequest::RotatedQuad { fill, .. }
            | DrawRequest::Circle { fill, .. } => Some(fill),
            DrawRequest::Model { .. } => None,
        }
    }

    /// Whether the request feeds the 2D quad batch
    pub fn is_quad_family(&self) -> bool {
        !matches!(self, DrawRequest::Model { .. })
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
