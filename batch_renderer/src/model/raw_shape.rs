/// Raw shape data as produced by an external OBJ-style parser.
///
/// Attributes are flat float arrays: positions and normals hold 3 floats per
/// entry, texture coordinates 2. Each mesh corner picks one entry from each
/// array through a `MeshIndex`.

use crate::error::{Error, Result};

/// Floats per position entry
pub const POSITION_STRIDE: usize = 3;
/// Floats per normal entry
pub const NORMAL_STRIDE: usize = 3;
/// Floats per texture-coordinate entry
pub const TEXCOORD_STRIDE: usize = 2;

/// Flat attribute arrays shared by every mesh of a shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAttributes {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
}

/// Attribute indices of one mesh corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshIndex {
    pub vertex_index: usize,
    pub normal_index: usize,
    pub texcoord_index: usize,
}

impl MeshIndex {
    pub fn new(vertex_index: usize, normal_index: usize, texcoord_index: usize) -> Self {
        Self { vertex_index, normal_index, texcoord_index }
    }
}

/// One named sub-object of a model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeMesh {
    pub name: String,
    /// Corners in draw order, three per triangle
    pub indices: Vec<MeshIndex>,
}

/// A parsed model: attribute arrays plus the meshes indexing into them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawShape {
    pub attributes: RawAttributes,
    pub meshes: Vec<ShapeMesh>,
}

impl RawShape {
    pub fn new(attributes: RawAttributes, meshes: Vec<ShapeMesh>) -> Self {
        Self { attributes, meshes }
    }

    /// Total corners across all meshes
    pub fn corner_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.indices.len()).sum()
    }

    /// Check every corner against its attribute arrays.
    ///
    /// `name` is the library key, used in the error only.
    ///
    /// # Errors
    ///
    /// `MalformedModel` naming the first mesh and corner that reads out of range.
    pub fn validate(&self, name: &str) -> Result<()> {
        let attributes = &self.attributes;
        for mesh in &self.meshes {
            for (corner, index) in mesh.indices.iter().enumerate() {
                let checks = [
                    ("position", index.vertex_index, POSITION_STRIDE, attributes.positions.len()),
                    ("normal", index.normal_index, NORMAL_STRIDE, attributes.normals.len()),
                    ("texcoord", index.texcoord_index, TEXCOORD_STRIDE, attributes.texcoords.len()),
                ];
                for (kind, entry, stride, len) in checks {
                    if !entry_in_range(entry, stride, len) {
                        return Err(Error::MalformedModel {
                            name: name.to_string(),
                            shape: mesh.name.clone(),
                            detail: format!(
                                "corner {} has {} index {} but only {} {} entries exist",
                                corner, kind, entry, len / stride, kind
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn entry_in_range(entry: usize, stride: usize, len: usize) -> bool {
    entry
        .checked_mul(stride)
        .and_then(|start| start.checked_add(stride))
        .map_or(false, |end| end <= len)
}

#[cfg(test)]
#[path = "raw_shape_tests.rs"]
mod tests;
