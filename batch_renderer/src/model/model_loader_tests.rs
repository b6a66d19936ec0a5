use super::*;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::model::{MeshIndex, RawAttributes, ShapeMesh};

fn triangle() -> RawShape {
    RawShape::new(
        RawAttributes {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0],
            texcoords: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        },
        vec![ShapeMesh {
            name: "face".to_string(),
            indices: vec![MeshIndex::new(0, 0, 0), MeshIndex::new(1, 0, 1), MeshIndex::new(2, 0, 2)],
        }],
    )
}

fn library_with(name: &str, shape: RawShape) -> ShapeLibrary {
    let mut library = ShapeLibrary::new();
    library.add(name, shape);
    library
}

// ============================================================================
// load_model
// ============================================================================

#[test]
fn test_single_triangle_yields_three_offset_vertices() {
    let library = library_with("tri", triangle());
    let offset = Vec3::new(10.0, 20.0, 30.0);
    let color = Vec4::new(0.2, 0.4, 0.6, 1.0);
    let mut vertices = Vec::new();

    let appended = load_model(&library, "tri", &mut vertices, offset, color, 3.0).unwrap();

    assert_eq!(appended, 3);
    assert_eq!(vertices.len(), 3);
    let raw = [Vec3::ZERO, Vec3::X, Vec3::Y];
    for (vertex, raw_position) in vertices.iter().zip(raw) {
        assert_eq!(vertex.position(), raw_position + offset);
        assert_eq!(vertex.normal(), Vec3::Z);
        assert_eq!(vertex.color, color.to_array());
        assert_eq!(vertex.tex_id, 3.0);
    }
    assert_eq!(vertices[1].tex_coord(), Vec2::new(1.0, 0.0));
}

#[test]
fn test_load_appends_after_existing_vertices() {
    let library = library_with("tri", triangle());
    let mut vertices = Vec::new();

    load_model(&library, "tri", &mut vertices, Vec3::ZERO, Vec4::ONE, 0.0).unwrap();
    load_model(&library, "tri", &mut vertices, Vec3::X, Vec4::ONE, 0.0).unwrap();

    assert_eq!(vertices.len(), 6);
    assert_eq!(vertices[3].position(), Vec3::X);
}

#[test]
fn test_all_meshes_are_walked() {
    let mut shape = triangle();
    let second = ShapeMesh { name: "back".to_string(), indices: shape.meshes[0].indices.clone() };
    shape.meshes.push(second);
    let library = library_with("quad", shape);
    let mut vertices = Vec::new();

    assert_eq!(load_model(&library, "quad", &mut vertices, Vec3::ZERO, Vec4::ONE, 0.0).unwrap(), 6);
}

#[test]
fn test_unknown_model_is_an_error() {
    let library = ShapeLibrary::new();
    let mut vertices = Vec::new();
    let err = load_model(&library, "ghost", &mut vertices, Vec3::ZERO, Vec4::ONE, 0.0).unwrap_err();
    assert_eq!(err, Error::UnknownShape("ghost".to_string()));
}

#[test]
fn test_out_of_range_index_reports_error_and_appends_nothing() {
    let mut shape = triangle();
    shape.meshes[0].indices[2].normal_index = 1;
    let library = library_with("broken", shape);
    let mut vertices = vec![PolyVertex::default()];

    let err = load_model(&library, "broken", &mut vertices, Vec3::ZERO, Vec4::ONE, 0.0).unwrap_err();

    match err {
        Error::MalformedModel { name, shape, .. } => {
            assert_eq!(name, "broken");
            assert_eq!(shape, "face");
        }
        other => panic!("expected MalformedModel, got {:?}", other),
    }
    assert_eq!(vertices.len(), 1);
}

// ============================================================================
// compile_model
// ============================================================================

#[test]
fn test_compile_model_uploads_interleaved_vertices() {
    let library = library_with("tri", triangle());
    let mut vertices = Vec::new();
    load_model(&library, "tri", &mut vertices, Vec3::ZERO, Vec4::ONE, 0.0).unwrap();
    let mut device = MockGraphicsDevice::new();

    let vertex_array = compile_model(&mut device, &vertices).unwrap();

    assert_eq!(vertex_array.layout().float_stride(), 13);
    assert_eq!(vertex_array.vertex_buffer().size(), 3 * 13 * 4);
    assert!(vertex_array.index_buffer().is_none());
    assert_eq!(device.created_vertex_arrays, vec!["PolyBatch"]);
}
