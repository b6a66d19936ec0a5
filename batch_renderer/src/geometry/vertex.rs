//! Vertex records written by the primitive expander and the model loader.
//!
//! Both records are `#[repr(C)]` plain-old-data built from `f32` arrays so a
//! slice of them can be handed to `Buffer::update` through
//! `bytemuck::cast_slice` with no padding in between.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

use crate::graphics_device::{BufferFormat, VertexLayout};

/// Vertices per quad
pub const QUAD_VERTEX_COUNT: usize = 4;

/// Indices per quad (two triangles)
pub const QUAD_INDEX_COUNT: usize = 6;

/// Local-space quad corners, centred on the origin (BL, BR, TR, TL)
pub const QUAD_CORNERS: [Vec3; QUAD_VERTEX_COUNT] = [
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(0.5, 0.5, 0.0),
    Vec3::new(-0.5, 0.5, 0.0),
];

/// Texture coordinates matching `QUAD_CORNERS`
pub const QUAD_TEX_COORDS: [Vec2; QUAD_VERTEX_COUNT] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Index pattern of one quad, relative to its first vertex
pub const QUAD_INDEX_PATTERN: [u32; QUAD_INDEX_COUNT] = [0, 1, 2, 2, 3, 0];

// ============================================================================
// QUAD VERTEX
// ============================================================================

/// One corner of a batched quad
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    /// Index into the texture-slot table (0 = white placeholder)
    pub tex_id: f32,
    /// Texture repeat factor
    pub tile_count: f32,
}

impl QuadVertex {
    pub fn new(position: Vec3, color: Vec4, tex_coord: Vec2, tex_id: f32, tile_count: f32) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            tex_coord: tex_coord.to_array(),
            tex_id,
            tile_count,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }

    pub fn tex_coord(&self) -> Vec2 {
        Vec2::from_array(self.tex_coord)
    }

    /// Interleaved layout: position:3, color:4, texCoord:2, texID:1, tileCount:1
    pub fn layout() -> VertexLayout {
        VertexLayout::packed(&[
            ("a_Position", BufferFormat::R32G32B32_SFLOAT),
            ("a_Color", BufferFormat::R32G32B32A32_SFLOAT),
            ("a_TexCoord", BufferFormat::R32G32_SFLOAT),
            ("a_TexID", BufferFormat::R32_SFLOAT),
            ("a_TileCount", BufferFormat::R32_SFLOAT),
        ])
    }
}

// ============================================================================
// POLY VERTEX
// ============================================================================

/// One corner of a loaded 3D model, already offset to world space
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct PolyVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub tex_id: f32,
}

impl PolyVertex {
    pub fn new(position: Vec3, normal: Vec3, color: Vec4, tex_coord: Vec2, tex_id: f32) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: color.to_array(),
            tex_coord: tex_coord.to_array(),
            tex_id,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    pub fn tex_coord(&self) -> Vec2 {
        Vec2::from_array(self.tex_coord)
    }

    /// Interleaved layout: position:3, normal:3, color:4, texCoord:2, texID:1 (13 floats)
    pub fn layout() -> VertexLayout {
        VertexLayout::packed(&[
            ("a_Position", BufferFormat::R32G32B32_SFLOAT),
            ("a_Normal", BufferFormat::R32G32B32_SFLOAT),
            ("a_Color", BufferFormat::R32G32B32A32_SFLOAT),
            ("a_TexCoord", BufferFormat::R32G32_SFLOAT),
            ("a_TexID", BufferFormat::R32_SFLOAT),
        ])
    }
}

#[cfg(test)]
#[path = "vertex_tests.rs"]
mod tests;
