use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use glam::{Vec2, Vec3, Vec4};

fn config(max_quads: usize) -> RendererConfig {
    RendererConfig { max_quads, max_texture_slots: 4, ..Default::default() }
}

fn corners(x: f32) -> [QuadVertex; 4] {
    [0.0, 1.0, 2.0, 3.0].map(|i| QuadVertex::new(Vec3::new(x, i, 0.0), Vec4::ONE, Vec2::ZERO, 0.0, 1.0))
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_quad_indices_pattern() {
    assert_eq!(quad_indices(2), vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
    assert!(quad_indices(0).is_empty());
}

#[test]
fn test_new_allocates_device_objects_once() {
    let mut device = MockGraphicsDevice::new();
    let batch = QuadBatch::new(&mut device, &config(3)).unwrap();

    assert_eq!(device.created_buffers.len(), 2);
    assert_eq!(device.created_vertex_arrays, vec!["QuadBatch"]);
    assert_eq!(device.created_textures, vec!["White"]);
    assert_eq!(batch.vertex_array().index_count(), 18);
    assert_eq!(batch.vertex_array().vertex_buffer().size(), 3 * 4 * 44);
    assert_eq!(batch.max_indices(), 18);
    assert!(batch.is_empty());
    assert_eq!(batch.texture_slots().len(), 1);
}

// ============================================================================
// push_quad
// ============================================================================

#[test]
fn test_push_quad_advances_cursors() {
    let mut device = MockGraphicsDevice::new();
    let mut batch = QuadBatch::new(&mut device, &config(3)).unwrap();

    assert!(batch.push_quad(&corners(0.0)));
    assert!(batch.push_quad(&corners(1.0)));

    assert_eq!(batch.index_count(), 12);
    assert_eq!(batch.quad_count(), 2);
    assert_eq!(batch.vertices().len(), 8);
    assert_eq!(batch.vertices()[4].position(), Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_push_quad_refuses_when_full() {
    let mut device = MockGraphicsDevice::new();
    let mut batch = QuadBatch::new(&mut device, &config(1)).unwrap();

    assert!(batch.push_quad(&corners(0.0)));
    assert!(batch.is_full());
    assert!(!batch.push_quad(&corners(1.0)));
    assert_eq!(batch.index_count(), 6);
    assert_eq!(batch.vertices().len(), 4);
}

// ============================================================================
// flush / reset
// ============================================================================

#[test]
fn test_flush_empty_batch_draws_nothing() {
    let mut device = MockGraphicsDevice::new();
    let batch = QuadBatch::new(&mut device, &config(2)).unwrap();

    assert!(!batch.flush(&mut device).unwrap());
    assert!(device.draw_calls.is_empty());
}

#[test]
fn test_flush_uploads_and_draws() {
    let mut device = MockGraphicsDevice::new();
    let mut batch = QuadBatch::new(&mut device, &config(4)).unwrap();
    let sprite = device.make_texture("sprite");

    assert_eq!(batch.resolve_texture(&sprite).unwrap(), 1);
    batch.push_quad(&corners(0.0));
    batch.push_quad(&corners(5.0));

    batch.bind_texture_slots(&mut device).unwrap();
    assert!(batch.flush(&mut device).unwrap());

    let draws = device.indexed_draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].count, 12);
    assert_eq!(draws[0].vertex_count(44), 8);
    assert_eq!(draws[0].textures.get(&1), Some(&sprite.id()));
    assert_eq!(draws[0].textures.len(), 2);

    let uploaded: Vec<QuadVertex> = bytemuck::pod_collect_to_vec(&draws[0].vertex_bytes);
    assert_eq!(uploaded[4].position(), Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(
        device.commands,
        vec!["bind_texture:0", "bind_texture:1", "draw_indexed:12"]
    );
}

#[test]
fn test_flush_leaves_slot_binding_to_caller() {
    let mut device = MockGraphicsDevice::new();
    let mut batch = QuadBatch::new(&mut device, &config(4)).unwrap();
    batch.push_quad(&corners(0.0));

    assert!(batch.flush(&mut device).unwrap());
    assert_eq!(device.commands, vec!["draw_indexed:6"]);
}

#[test]
fn test_bind_texture_slots_without_quads_binds_placeholder() {
    let mut device = MockGraphicsDevice::new();
    let batch = QuadBatch::new(&mut device, &config(4)).unwrap();

    batch.bind_texture_slots(&mut device).unwrap();

    assert_eq!(device.commands, vec!["bind_texture:0"]);
    assert!(batch.is_empty());
}

#[test]
fn test_reset_rewinds_everything() {
    let mut device = MockGraphicsDevice::new();
    let mut batch = QuadBatch::new(&mut device, &config(1)).unwrap();
    let sprite = device.make_texture("sprite");

    batch.resolve_texture(&sprite).unwrap();
    batch.push_quad(&corners(0.0));
    batch.reset();

    assert!(batch.is_empty());
    assert!(!batch.is_full());
    assert!(batch.vertices().is_empty());
    assert_eq!(batch.texture_slots().len(), 1);
    assert!(batch.push_quad(&corners(2.0)));
}
