/// GraphicsDevice trait - the immediate-mode graphics API consumed by the batcher

use std::sync::Arc;
use glam::Mat4;

use crate::error::Result;
use crate::graphics_device::{
    Buffer, Texture, Shader, VertexArray,
    BufferDesc, TextureDesc, ShaderDesc, VertexArrayDesc,
};

/// Graphics device trait
///
/// This is the only interface the batch renderer uses to reach the graphics
/// API. Calls are synchronous from the caller's point of view (command
/// submission, not completion). Implemented by backend-specific devices
/// (OpenGL, a command recorder, a test mock, ...).
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor (size, usage, optional initial data)
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a texture, uploading `desc.data` if present
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create (compile and link) a shader program
    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>>;

    /// Create a vertex array binding a vertex buffer, its layout and an
    /// optional index buffer
    fn create_vertex_array(&mut self, desc: VertexArrayDesc) -> Result<Arc<dyn VertexArray>>;

    /// Make `shader` the active program
    fn bind_shader(&mut self, shader: &Arc<dyn Shader>) -> Result<()>;

    /// Upload a 4x4 matrix uniform to `shader`
    fn set_uniform_mat4(&mut self, shader: &Arc<dyn Shader>, name: &str, value: &Mat4) -> Result<()>;

    /// Upload an integer array uniform (sampler table) to `shader`
    fn set_uniform_int_array(&mut self, shader: &Arc<dyn Shader>, name: &str, values: &[i32]) -> Result<()>;

    /// Bind `texture` to texture unit `slot`
    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Resize the viewport
    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32);

    /// Issue an indexed draw of `index_count` indices from `vertex_array`
    fn draw_indexed(&mut self, vertex_array: &Arc<dyn VertexArray>, index_count: u32) -> Result<()>;

    /// Issue a non-indexed draw of `vertex_count` vertices from `vertex_array`
    fn draw(&mut self, vertex_array: &Arc<dyn VertexArray>, vertex_count: u32) -> Result<()>;
}
