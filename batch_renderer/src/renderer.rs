//! Batch renderer - scene lifecycle and draw-call batching.
//!
//! A `BatchRenderer` owns all batching state explicitly: the 2D quad batch,
//! the per-frame 3D vertex list, the shader and shape libraries and the
//! current view-projection matrix. The graphics device is shared with the
//! application as `Arc<Mutex<dyn GraphicsDevice>>` and locked per operation.
//!
//! # Scene discipline
//!
//! ```ignore
//! renderer.begin_scene(&camera)?;
//! renderer.draw_quad(Vec3::ZERO, Vec2::ONE, color)?;   // accumulates
//! renderer.draw_model("cube", position, color, 0.0)?;  // accumulates
//! renderer.end_scene()?;                               // one draw per family
//! ```
//!
//! Filling the quad batch flushes it mid-scene and carries on; the caller
//! never sees it. Every other failure (nested `begin_scene`, a draw with no
//! open scene, slot exhaustion under `TextureExhaustion::Reject`, malformed
//! model data, device errors) discards the accumulated geometry, closes the
//! scene and is returned.

use std::sync::{Arc, Mutex, MutexGuard};
use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::camera::{Camera, ProjectionKind};
use crate::config::{RendererConfig, TextureExhaustion};
use crate::draw::{expand_quad, quad_transforms, DrawRequest, Fill};
use crate::error::{Error, Result};
use crate::geometry::PolyVertex;
use crate::graphics_device::{GraphicsDevice, Shader, Texture, VertexArray};
use crate::model::{self, ShapeLibrary};
use crate::shader_library::ShaderLibrary;
use crate::storage::{PolyBatch, QuadBatch};
use crate::{batch_bail, batch_debug, batch_error, batch_info, batch_trace, batch_warn};

const SOURCE: &str = "batch::Renderer";

/// Sampler array uniform of both shaders
pub const UNIFORM_TEXTURES: &str = "u_Textures";
/// View-projection uniform
pub const UNIFORM_VIEW_PROJECTION: &str = "u_ViewProjection";
/// Model transform uniform used by `submit`
pub const UNIFORM_TRANSFORM: &str = "u_Transform";

/// Whether a scene is open, and with which kind of camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Closed,
    Open(ProjectionKind),
}

/// Per-scene statistics, reset by `begin_scene`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Draw calls issued (batched families and `submit`)
    pub draw_calls: u32,
    /// Quads written to the 2D batch
    pub quads: u32,
    /// Vertices appended to the 3D list
    pub poly_vertices: u32,
    /// Mid-scene flushes (capacity, texture exhaustion or explicit `flush`)
    pub flushes: u32,
    /// Most texture slots in use at once, placeholder included
    pub texture_slots_used: u32,
}

pub struct BatchRenderer {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    config: RendererConfig,
    shaders: ShaderLibrary,
    texture_shader: Arc<dyn Shader>,
    lighting_shader: Arc<dyn Shader>,
    shapes: ShapeLibrary,
    quads: QuadBatch,
    polys: PolyBatch,
    view_projection: Mat4,
    state: SceneState,
    stats: RendererStats,
}

impl BatchRenderer {
    /// Create a renderer and allocate its batch storage on `device`.
    ///
    /// Loads the texture and lighting shaders, uploads the sampler array
    /// `[0, 1, .., max_texture_slots - 1]` to both, and allocates the quad
    /// vertex buffer, the precomputed index buffer and the white texture.
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` if `config` fails validation
    /// * any device error raised while allocating
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: RendererConfig) -> Result<Self> {
        config.validate()?;

        let mut shaders = ShaderLibrary::new();
        let (texture_shader, lighting_shader, quads) = {
            let mut guard = lock_device(&device)?;
            let texture_shader = shaders.load(&mut *guard, &config.texture_shader_path)?;
            let lighting_shader = shaders.load(&mut *guard, &config.lighting_shader_path)?;

            let samplers: Vec<i32> = (0..config.max_texture_slots as i32).collect();
            for shader in [&texture_shader, &lighting_shader] {
                guard.bind_shader(shader)?;
                guard.set_uniform_int_array(shader, UNIFORM_TEXTURES, &samplers)?;
            }

            let quads = QuadBatch::new(&mut *guard, &config)?;
            (texture_shader, lighting_shader, quads)
        };

        batch_info!(SOURCE, "Batch renderer created ({} quads per batch, {} texture slots)",
            config.max_quads, config.max_texture_slots);

        Ok(Self {
            device,
            config,
            shaders,
            texture_shader,
            lighting_shader,
            shapes: ShapeLibrary::new(),
            quads,
            polys: PolyBatch::new(),
            view_projection: Mat4::IDENTITY,
            state: SceneState::Closed,
            stats: RendererStats::default(),
        })
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn scene_state(&self) -> SceneState {
        self.state
    }

    pub fn is_scene_open(&self) -> bool {
        self.state != SceneState::Closed
    }

    /// Statistics of the current (or last) scene
    pub fn stats(&self) -> RendererStats {
        self.stats
    }

    /// View-projection matrix uploaded by the last `begin_scene`
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    pub fn texture_shader(&self) -> &Arc<dyn Shader> {
        &self.texture_shader
    }

    pub fn lighting_shader(&self) -> &Arc<dyn Shader> {
        &self.lighting_shader
    }

    pub fn shader_library(&self) -> &ShaderLibrary {
        &self.shaders
    }

    /// Load (or fetch) an extra shader for use with `submit`
    pub fn load_shader(&mut self, path: &str) -> Result<Arc<dyn Shader>> {
        let mut device = lock_device(&self.device)?;
        self.shaders.load(&mut *device, path)
    }

    pub fn shapes(&self) -> &ShapeLibrary {
        &self.shapes
    }

    /// Shape library that `DrawRequest::Model` reads from
    pub fn shapes_mut(&mut self) -> &mut ShapeLibrary {
        &mut self.shapes
    }

    /// Quads accumulated since the last flush
    pub fn pending_quads(&self) -> usize {
        self.quads.quad_count()
    }

    /// 3D vertices accumulated in the current scene
    pub fn pending_poly_vertices(&self) -> &[PolyVertex] {
        self.polys.vertices()
    }

    // ===== WINDOW =====

    /// Forward a window resize to the device viewport
    pub fn on_window_resize(&mut self, width: u32, height: u32) -> Result<()> {
        lock_device(&self.device)?.set_viewport(0, 0, width, height);
        Ok(())
    }

    // ===== SCENE LIFECYCLE =====

    /// Open a scene with `camera`.
    ///
    /// Uploads the camera's view-projection to the texture shader, and to the
    /// lighting shader as well for perspective cameras. Resets the vertex
    /// cursor, the index count, the slot table and the statistics.
    ///
    /// # Errors
    ///
    /// `SceneAlreadyOpen` if a scene is open. That scene is aborted.
    pub fn begin_scene(&mut self, camera: &Camera) -> Result<()> {
        if self.is_scene_open() {
            let err = Error::SceneAlreadyOpen;
            self.abort_scene(&err);
            return Err(err);
        }

        self.quads.reset();
        self.polys.clear();
        self.stats = RendererStats::default();
        self.view_projection = camera.view_projection_matrix();

        {
            let mut device = lock_device(&self.device)?;
            device.bind_shader(&self.texture_shader)?;
            device.set_uniform_mat4(&self.texture_shader, UNIFORM_VIEW_PROJECTION, &self.view_projection)?;
            if camera.kind() == ProjectionKind::Perspective {
                device.bind_shader(&self.lighting_shader)?;
                device.set_uniform_mat4(&self.lighting_shader, UNIFORM_VIEW_PROJECTION, &self.view_projection)?;
            }
        }

        self.state = SceneState::Open(camera.kind());
        batch_trace!(SOURCE, "Scene opened ({:?})", camera.kind());
        Ok(())
    }

    /// Close the scene, issuing at most one draw call per primitive family.
    ///
    /// Nothing is drawn when the scene is empty. All cursors are reset for the
    /// next scene either way.
    ///
    /// # Errors
    ///
    /// `NoOpenScene` if no scene is open; device errors abort the scene.
    pub fn end_scene(&mut self) -> Result<()> {
        self.require_open_scene()?;
        let result = self.flush_families();
        let result = self.abort_on_error(result);
        if result.is_ok() {
            self.state = SceneState::Closed;
            batch_trace!(SOURCE, "Scene closed ({} draw calls, {} quads, {} 3D vertices)",
                self.stats.draw_calls, self.stats.quads, self.stats.poly_vertices);
        }
        result
    }

    /// Draw everything accumulated so far and keep the scene open
    pub fn flush(&mut self) -> Result<()> {
        self.require_open_scene()?;
        self.stats.flushes += 1;
        let result = self.flush_families();
        self.abort_on_error(result)
    }

    // ===== DRAWING =====

    /// Expand `request` into the batch storage of its family.
    ///
    /// # Errors
    ///
    /// `NoOpenScene`, `TextureSlotsExhausted` (with `TextureExhaustion::Reject`),
    /// `UnknownShape`, `MalformedModel` or a device error. Except for
    /// `NoOpenScene`, the scene is aborted.
    pub fn draw(&mut self, request: DrawRequest) -> Result<()> {
        self.require_open_scene()?;
        let result = match &request {
            DrawRequest::Model { name, position, color, tex_id, .. } => {
                self.expand_model(name, *position, *color, *tex_id)
            }
            _ => self.expand_quads(&request),
        };
        self.abort_on_error(result)
    }

    /// Solid-colour quad centred on `position`
    pub fn draw_quad(&mut self, position: Vec3, size: Vec2, color: Vec4) -> Result<()> {
        self.draw(DrawRequest::quad(position, size, Fill::color(color)))
    }

    /// Solid-colour quad at z = 0
    pub fn draw_quad_2d(&mut self, position: Vec2, size: Vec2, color: Vec4) -> Result<()> {
        self.draw(DrawRequest::quad_2d(position, size, Fill::color(color)))
    }

    /// Textured quad, repeated `tile_count` times and multiplied by `tint`
    pub fn draw_textured_quad(
        &mut self,
        position: Vec3,
        size: Vec2,
        texture: &Arc<dyn Texture>,
        tile_count: f32,
        tint: Vec4,
    ) -> Result<()> {
        let fill = Fill::texture(Arc::clone(texture)).with_tile_count(tile_count).with_tint(tint);
        self.draw(DrawRequest::quad(position, size, fill))
    }

    /// Quad rotated by `rotation` radians about Z around its centre
    pub fn draw_rotated_quad(&mut self, position: Vec3, size: Vec2, rotation: f32, fill: Fill) -> Result<()> {
        self.draw(DrawRequest::rotated_quad(position, size, rotation, fill))
    }

    /// Circle made of `circle_segments` rotated quads
    pub fn draw_circle(&mut self, position: Vec3, size: Vec2, fill: Fill) -> Result<()> {
        self.draw(DrawRequest::circle(position, size, fill))
    }

    /// Shape from the shape library translated to `position`
    pub fn draw_model(&mut self, name: &str, position: Vec3, color: Vec4, tex_id: f32) -> Result<()> {
        self.draw(DrawRequest::model(name, position, color, tex_id))
    }

    // ===== MODELS =====

    /// Append the vertices of shape `name` to a caller-owned list.
    ///
    /// Needs no open scene; see `model::load_model`.
    pub fn load_model(
        &self,
        name: &str,
        vertices: &mut Vec<PolyVertex>,
        position: Vec3,
        color: Vec4,
        tex_id: f32,
    ) -> Result<usize> {
        model::load_model(&self.shapes, name, vertices, position, color, tex_id)
    }

    /// Upload `vertices` and record their count for the next `submit_compiled`
    pub fn compile_model(&mut self, vertices: &[PolyVertex]) -> Result<Arc<dyn VertexArray>> {
        let vertex_array = {
            let mut device = lock_device(&self.device)?;
            model::compile_model(&mut *device, vertices)?
        };
        self.polys.set_compiled(Arc::clone(&vertex_array), vertices.len() as u32);
        Ok(vertex_array)
    }

    // ===== UNBATCHED SUBMISSION =====

    /// Draw `vertex_array` with `shader` outside the batches.
    ///
    /// Binds the shader, uploads the scene view-projection and `transform`,
    /// and issues one indexed draw over the whole index buffer.
    pub fn submit(&mut self, shader: &Arc<dyn Shader>, vertex_array: &Arc<dyn VertexArray>, transform: &Mat4) -> Result<()> {
        self.require_open_scene()?;
        let result = self.submit_indexed(shader, vertex_array, transform);
        self.abort_on_error(result)
    }

    /// Draw the last compiled model with `shader`.
    ///
    /// Uses the vertex count recorded by `compile_model` and resets it to 0, so
    /// a second call without compiling again draws nothing.
    pub fn submit_compiled(&mut self, shader: &Arc<dyn Shader>, vertex_array: &Arc<dyn VertexArray>) -> Result<()> {
        self.require_open_scene()?;
        let count = self.polys.take_compiled_count();
        if count == 0 {
            batch_warn!(SOURCE, "submit_compiled with no compiled vertices, nothing drawn");
            return Ok(());
        }
        let result = self.submit_array(shader, vertex_array, count);
        self.abort_on_error(result)
    }

    // ===== INTERNALS =====

    fn require_open_scene(&self) -> Result<()> {
        if self.is_scene_open() {
            Ok(())
        } else {
            Err(Error::NoOpenScene)
        }
    }

    /// Discard accumulated geometry and close the scene
    fn abort_scene(&mut self, err: &Error) {
        batch_error!(SOURCE, "Scene aborted: {}", err);
        self.quads.reset();
        self.polys.clear();
        self.state = SceneState::Closed;
    }

    fn abort_on_error<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.abort_scene(err);
        }
        result
    }

    fn expand_quads(&mut self, request: &DrawRequest) -> Result<()> {
        let Some(fill) = request.fill() else {
            return Ok(());
        };
        let transforms = quad_transforms(request, self.config.circle_segments, self.config.circle_step_degrees);
        for transform in &transforms {
            self.push_quad(transform, fill)?;
        }
        Ok(())
    }

    fn push_quad(&mut self, transform: &Mat4, fill: &Fill) -> Result<()> {
        if self.quads.is_full() {
            batch_debug!(SOURCE, "Quad batch full ({} indices), flushing", self.quads.index_count());
            self.stats.flushes += 1;
            self.flush_quads()?;
        }

        let tex_index = match fill.texture_handle() {
            Some(texture) => self.resolve_texture(texture)? as f32,
            None => 0.0,
        };

        let corners = expand_quad(transform, fill.vertex_color(), tex_index, fill.tile_count());
        if !self.quads.push_quad(&corners) {
            batch_bail!(SOURCE, "Quad batch rejected a quad right after flushing");
        }

        self.stats.quads += 1;
        self.stats.texture_slots_used = self
            .stats
            .texture_slots_used
            .max(self.quads.texture_slots().len() as u32);
        Ok(())
    }

    fn resolve_texture(&mut self, texture: &Arc<dyn Texture>) -> Result<usize> {
        match self.quads.resolve_texture(texture) {
            Err(Error::TextureSlotsExhausted { capacity })
                if self.config.texture_exhaustion == TextureExhaustion::Flush =>
            {
                batch_debug!(SOURCE, "All {} texture slots in use, flushing", capacity);
                self.stats.flushes += 1;
                self.flush_quads()?;
                self.quads.resolve_texture(texture)
            }
            other => other,
        }
    }

    fn expand_model(&mut self, name: &str, position: Vec3, color: Vec4, tex_id: f32) -> Result<()> {
        let appended = model::load_model(&self.shapes, name, self.polys.vertices_mut(), position, color, tex_id)?;
        self.stats.poly_vertices += appended as u32;
        Ok(())
    }

    /// Draw the quad batch (if not empty) and rewind it. Used mid-scene.
    fn flush_quads(&mut self) -> Result<()> {
        if !self.quads.is_empty() {
            let mut device = lock_device(&self.device)?;
            device.bind_shader(&self.texture_shader)?;
            self.quads.bind_texture_slots(&mut *device)?;
            self.quads.flush(&mut *device)?;
            self.stats.draw_calls += 1;
        }
        self.quads.reset();
        Ok(())
    }

    /// Bind the slot table once, draw each non-empty family, then rewind both.
    ///
    /// The slot table stays intact until the 3D draw has been issued, so
    /// models sample the same slots as the quads of the scene.
    fn flush_families(&mut self) -> Result<()> {
        if !self.quads.is_empty() || !self.polys.is_empty() {
            let mut device = lock_device(&self.device)?;
            self.quads.bind_texture_slots(&mut *device)?;
            if !self.quads.is_empty() {
                device.bind_shader(&self.texture_shader)?;
                self.quads.flush(&mut *device)?;
                self.stats.draw_calls += 1;
            }
            if !self.polys.is_empty() {
                device.bind_shader(&self.lighting_shader)?;
                self.polys.flush(&mut *device)?;
                self.stats.draw_calls += 1;
            }
        }
        self.quads.reset();
        self.polys.clear();
        Ok(())
    }

    fn submit_indexed(&mut self, shader: &Arc<dyn Shader>, vertex_array: &Arc<dyn VertexArray>, transform: &Mat4) -> Result<()> {
        let mut device = lock_device(&self.device)?;
        device.bind_shader(shader)?;
        device.set_uniform_mat4(shader, UNIFORM_VIEW_PROJECTION, &self.view_projection)?;
        device.set_uniform_mat4(shader, UNIFORM_TRANSFORM, transform)?;
        device.draw_indexed(vertex_array, vertex_array.index_count())?;
        self.stats.draw_calls += 1;
        Ok(())
    }

    fn submit_array(&mut self, shader: &Arc<dyn Shader>, vertex_array: &Arc<dyn VertexArray>, count: u32) -> Result<()> {
        let mut device = lock_device(&self.device)?;
        device.bind_shader(shader)?;
        device.draw(vertex_array, count)?;
        self.stats.draw_calls += 1;
        Ok(())
    }
}

impl Drop for BatchRenderer {
    fn drop(&mut self) {
        if self.is_scene_open() {
            batch_warn!(SOURCE, "Renderer dropped with an open scene ({} quads, {} 3D vertices discarded)",
                self.quads.quad_count(), self.polys.len());
        }
    }
}

fn lock_device(device: &Arc<Mutex<dyn GraphicsDevice>>) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device
        .lock()
        .map_err(|_| crate::batch_err!(SOURCE, "Graphics device lock poisoned"))
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
