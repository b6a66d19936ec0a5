//! Model loader - raw shape data to world-space `PolyVertex` records.
//!
//! `load_model` validates the whole shape before appending anything, so a
//! malformed model leaves the output list untouched. Positions are only
//! translated; no rotation or scale is applied.

use std::sync::Arc;
use glam::{Vec2, Vec3, Vec4};

use crate::error::Result;
use crate::geometry::PolyVertex;
use crate::graphics_device::{GraphicsDevice, VertexArray, BufferDesc, VertexArrayDesc};
use crate::model::{RawShape, ShapeLibrary, NORMAL_STRIDE, POSITION_STRIDE, TEXCOORD_STRIDE};

/// Append one vertex per mesh corner of the shape registered under `name`.
///
/// Every vertex gets `position` added to its raw position and is tagged with
/// `color` and `tex_id`. Returns the number of vertices appended.
///
/// # Errors
///
/// * `UnknownShape` if nothing is registered under `name`
/// * `MalformedModel` if a corner indexes past an attribute array
pub fn load_model(
    library: &ShapeLibrary,
    name: &str,
    vertices: &mut Vec<PolyVertex>,
    position: Vec3,
    color: Vec4,
    tex_id: f32,
) -> Result<usize> {
    let shape = library.get(name)?;
    shape.validate(name)?;
    Ok(append_shape(shape, vertices, position, color, tex_id))
}

/// Append the corners of an already validated shape
fn append_shape(shape: &RawShape, vertices: &mut Vec<PolyVertex>, position: Vec3, color: Vec4, tex_id: f32) -> usize {
    let attributes = &shape.attributes;
    let before = vertices.len();
    vertices.reserve(shape.corner_count());

    for mesh in &shape.meshes {
        for index in &mesh.indices {
            let p = index.vertex_index * POSITION_STRIDE;
            let n = index.normal_index * NORMAL_STRIDE;
            let t = index.texcoord_index * TEXCOORD_STRIDE;
            vertices.push(PolyVertex::new(
                Vec3::from_slice(&attributes.positions[p..p + POSITION_STRIDE]) + position,
                Vec3::from_slice(&attributes.normals[n..n + NORMAL_STRIDE]),
                color,
                Vec2::from_slice(&attributes.texcoords[t..t + TEXCOORD_STRIDE]),
                tex_id,
            ));
        }
    }

    vertices.len() - before
}

/// Upload `vertices` as one interleaved vertex buffer with the PolyVertex layout
/// (position:3, normal:3, color:4, texCoord:2, texID:1).
pub fn compile_model(device: &mut dyn GraphicsDevice, vertices: &[PolyVertex]) -> Result<Arc<dyn VertexArray>> {
    let bytes = bytemuck::cast_slice::<PolyVertex, u8>(vertices).to_vec();
    let vertex_buffer = device.create_buffer(BufferDesc::vertex_with_data(bytes))?;
    device.create_vertex_array(VertexArrayDesc {
        name: "PolyBatch".to_string(),
        vertex_buffer,
        layout: PolyVertex::layout(),
        index_buffer: None,
    })
}

#[cfg(test)]
#[path = "model_loader_tests.rs"]
mod tests;
