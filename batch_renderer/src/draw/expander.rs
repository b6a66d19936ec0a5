//! Primitive expansion - TRS transforms and corner generation.
//!
//! Pure functions, no device or storage access. Every quad-family request
//! becomes one or more model transforms, and each transform becomes four
//! `QuadVertex` records by transforming the canonical corners.
//!
//! Transforms compose as `translate * rotate_z * scale`, so rotation happens
//! around the quad's local centre before it is moved into place.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::draw::DrawRequest;
use crate::geometry::{QuadVertex, QUAD_CORNERS, QUAD_TEX_COORDS, QUAD_VERTEX_COUNT};

/// `translate(position) * scale(size.x, size.y, 1)`
pub fn quad_transform(position: Vec3, size: Vec2) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_scale(size.extend(1.0))
}

/// `translate(position) * rotate_z(rotation) * scale(size.x, size.y, 1)`, rotation in radians
pub fn rotated_quad_transform(position: Vec3, size: Vec2, rotation: f32) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_z(rotation)
        * Mat4::from_scale(size.extend(1.0))
}

/// Rotations (radians) of the quads approximating a circle.
///
/// Segment `i` is rotated by `i * step_degrees` degrees, starting at 0.
pub fn circle_rotations(segments: u32, step_degrees: f32) -> impl Iterator<Item = f32> {
    (0..segments).map(move |i| (i as f32 * step_degrees).to_radians())
}

/// Model transforms of every quad a request expands to (empty for models)
pub fn quad_transforms(request: &DrawRequest, circle_segments: u32, circle_step_degrees: f32) -> Vec<Mat4> {
    match request {
        DrawRequest::Quad { position, size, .. } => vec![quad_transform(*position, *size)],
        DrawRequest::RotatedQuad { position, size, rotation, .. } => {
            vec![rotated_quad_transform(*position, *size, *rotation)]
        }
        DrawRequest::Circle { position, size, .. } => circle_rotations(circle_segments, circle_step_degrees)
            .map(|rotation| rotated_quad_transform(*position, *size, rotation))
            .collect(),
        DrawRequest::Model { .. } => Vec::new(),
    }
}

/// Four corner vertices of one quad placed by `transform`
pub fn expand_quad(transform: &Mat4, color: Vec4, tex_index: f32, tile_count: f32) -> [QuadVertex; QUAD_VERTEX_COUNT] {
    std::array::from_fn(|corner| {
        QuadVertex::new(
            transform.transform_point3(QUAD_CORNERS[corner]),
            color,
            QUAD_TEX_COORDS[corner],
            tex_index,
            tile_count,
        )
    })
}

#[cfg(test)]
#[path = "expander_tests.rs"]
mod tests;
