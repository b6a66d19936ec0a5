/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every command and every draw call it receives so batching
/// behaviour (draw-call counts, bound texture slots, uploaded vertices)
/// can be asserted without a graphics API.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use glam::Mat4;

use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, Buffer, Texture, Shader, VertexArray,
    BufferDesc, BufferUsage, TextureDesc, TextureId, TextureInfo, ShaderDesc,
    VertexArrayDesc, VertexLayout,
};
use crate::batch_bail;

/// True when both handles point at the same allocation
fn same_object<T: ?Sized, U: ?Sized>(a: &Arc<T>, b: &Arc<U>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub name: String,
    pub data: Mutex<Vec<u8>>,
}

impl MockBuffer {
    pub fn new(size: u64, usage: BufferUsage, name: String) -> Self {
        Self {
            size,
            usage,
            name,
            data: Mutex::new(vec![0; size as usize]),
        }
    }

    /// Copy of the current contents
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let end = offset + data.len() as u64;
        if end > self.size {
            batch_bail!("batch::mock",
                "write of {} bytes at offset {} overflows buffer '{}' ({} bytes)",
                data.len(), offset, self.name, self.size);
        }
        let mut contents = self.data.lock().unwrap();
        contents[offset as usize..end as usize].copy_from_slice(data);
        Ok(())
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub id: TextureId,
    pub info: TextureInfo,
    pub name: String,
}

impl MockTexture {
    pub fn new(id: u64, width: u32, height: u32, name: String) -> Self {
        Self {
            id: TextureId(id),
            info: TextureInfo {
                width,
                height,
                format: crate::graphics_device::TextureFormat::R8G8B8A8_UNORM,
            },
            name,
        }
    }
}

impl Texture for MockTexture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub path: String,
}

impl MockShader {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

impl Shader for MockShader {
    fn path(&self) -> &str {
        &self.path
    }
}

// ============================================================================
// Mock VertexArray
// ============================================================================

pub struct MockVertexArray {
    pub name: String,
    pub layout: VertexLayout,
    pub vertex_buffer: Arc<dyn Buffer>,
    pub index_buffer: Option<Arc<dyn Buffer>>,
    vertex_store: Arc<MockBuffer>,
    index_store: Option<Arc<MockBuffer>>,
}

impl VertexArray for MockVertexArray {
    fn name(&self) -> &str {
        &self.name
    }

    fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    fn vertex_buffer(&self) -> &Arc<dyn Buffer> {
        &self.vertex_buffer
    }

    fn index_buffer(&self) -> Option<&Arc<dyn Buffer>> {
        self.index_buffer.as_ref()
    }
}

// ============================================================================
// Recorded draw calls
// ============================================================================

/// One draw call as seen by the mock device
#[derive(Debug, Clone)]
pub struct MockDrawCall {
    /// `draw_indexed` (true) or `draw` (false)
    pub indexed: bool,
    /// Name of the vertex array drawn
    pub vertex_array: String,
    /// Index count (indexed) or vertex count (non-indexed)
    pub count: u32,
    /// Path of the shader bound at draw time
    pub shader: Option<String>,
    /// Texture bound to each slot at draw time
    pub textures: BTreeMap<u32, TextureId>,
    /// Vertex bytes referenced by the draw
    pub vertex_bytes: Vec<u8>,
}

impl MockDrawCall {
    /// Number of vertices referenced by the draw
    pub fn vertex_count(&self, stride: u32) -> usize {
        self.vertex_bytes.len() / stride as usize
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock device that tracks created resources and issued commands without GPU
#[derive(Default)]
pub struct MockGraphicsDevice {
    /// Every command, in order ("bind_shader:<path>", "draw_indexed:<n>", ...)
    pub commands: Vec<String>,
    /// Every draw call, in order
    pub draw_calls: Vec<MockDrawCall>,
    /// Matrix uniforms as (shader path, uniform name, value)
    pub mat4_uniforms: Vec<(String, String, Mat4)>,
    /// Integer array uniforms as (shader path, uniform name, values)
    pub int_array_uniforms: Vec<(String, String, Vec<i32>)>,
    /// Current viewport
    pub viewport: Option<(u32, u32, u32, u32)>,
    /// Names of created buffers
    pub created_buffers: Vec<String>,
    /// Names of created textures
    pub created_textures: Vec<String>,
    /// Paths of created shaders
    pub created_shaders: Vec<String>,
    /// Names of created vertex arrays
    pub created_vertex_arrays: Vec<String>,
    /// Make every draw call fail
    pub fail_draws: bool,

    bound_shader: Option<String>,
    bound_textures: BTreeMap<u32, TextureId>,
    buffers: Vec<Arc<MockBuffer>>,
    vertex_arrays: Vec<Arc<MockVertexArray>>,
    next_texture_id: u64,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock device already wrapped for sharing with a renderer.
    ///
    /// Returns the typed handle (for inspection) and the trait-object handle.
    pub fn shared() -> (Arc<Mutex<MockGraphicsDevice>>, Arc<Mutex<dyn GraphicsDevice>>) {
        let typed = Arc::new(Mutex::new(MockGraphicsDevice::new()));
        let dynamic: Arc<Mutex<dyn GraphicsDevice>> = typed.clone();
        (typed, dynamic)
    }

    /// Create a standalone texture with a fresh id (not recorded as a device command)
    pub fn make_texture(&mut self, name: &str) -> Arc<dyn Texture> {
        self.next_texture_id += 1;
        Arc::new(MockTexture::new(self.next_texture_id, 16, 16, name.to_string()))
    }

    /// Indexed draw calls only
    pub fn indexed_draws(&self) -> Vec<&MockDrawCall> {
        self.draw_calls.iter().filter(|call| call.indexed).collect()
    }

    /// Non-indexed draw calls only
    pub fn array_draws(&self) -> Vec<&MockDrawCall> {
        self.draw_calls.iter().filter(|call| !call.indexed).collect()
    }

    /// Forget recorded commands and draw calls (resources are kept)
    pub fn clear_log(&mut self) {
        self.commands.clear();
        self.draw_calls.clear();
        self.mat4_uniforms.clear();
        self.int_array_uniforms.clear();
    }

    fn find_buffer(&self, buffer: &Arc<dyn Buffer>) -> Option<Arc<MockBuffer>> {
        self.buffers.iter().find(|b| same_object(*b, buffer)).cloned()
    }

    fn find_vertex_array(&self, vertex_array: &Arc<dyn VertexArray>) -> Option<Arc<MockVertexArray>> {
        self.vertex_arrays.iter().find(|v| same_object(*v, vertex_array)).cloned()
    }

    fn record_draw(&mut self, vertex_array: &Arc<dyn VertexArray>, indexed: bool, count: u32) -> Result<()> {
        if self.fail_draws {
            batch_bail!("batch::mock", "draw rejected by mock device");
        }
        let Some(mock_array) = self.find_vertex_array(vertex_array) else {
            batch_bail!("batch::mock", "draw with a vertex array not created by this device");
        };

        let stride = mock_array.layout.stride as usize;
        let vertex_bytes = mock_array.vertex_store.contents();
        let used_vertices = if indexed {
            let Some(index_store) = mock_array.index_store.as_ref() else {
                batch_bail!("batch::mock", "draw_indexed on non-indexed vertex array '{}'", mock_array.name);
            };
            let indices: Vec<u32> = bytemuck::pod_collect_to_vec(&index_store.contents());
            if count as usize > indices.len() {
                batch_bail!("batch::mock",
                    "draw_indexed of {} indices but '{}' holds {}",
                    count, mock_array.name, indices.len());
            }
            indices[..count as usize].iter().map(|&i| i as usize + 1).max().unwrap_or(0)
        } else {
            count as usize
        };
        if used_vertices * stride > vertex_bytes.len() {
            batch_bail!("batch::mock",
                "draw reads {} vertices past the end of '{}'", used_vertices, mock_array.name);
        }

        self.commands.push(format!("{}:{}", if indexed { "draw_indexed" } else { "draw" }, count));
        self.draw_calls.push(MockDrawCall {
            indexed,
            vertex_array: mock_array.name.clone(),
            count,
            shader: self.bound_shader.clone(),
            textures: self.bound_textures.clone(),
            vertex_bytes: vertex_bytes[..used_vertices * stride].to_vec(),
        });
        Ok(())
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        let name = format!("buffer_{}_{:?}", self.buffers.len(), desc.usage);
        let buffer = Arc::new(MockBuffer::new(desc.size, desc.usage, name.clone()));
        if let Some(data) = desc.data.as_ref() {
            buffer.update(0, data)?;
        }
        self.created_buffers.push(name);
        self.buffers.push(buffer.clone());
        let handle: Arc<dyn Buffer> = buffer;
        Ok(handle)
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if let Some(data) = desc.data.as_ref() {
            if data.len() != desc.byte_size() {
                batch_bail!("batch::mock",
                    "texture '{}' expects {} bytes, got {}", desc.name, desc.byte_size(), data.len());
            }
        }
        self.next_texture_id += 1;
        self.created_textures.push(desc.name.clone());
        Ok(Arc::new(MockTexture::new(self.next_texture_id, desc.width, desc.height, desc.name)))
    }

    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        self.created_shaders.push(desc.path.clone());
        Ok(Arc::new(MockShader::new(desc.path)))
    }

    fn create_vertex_array(&mut self, desc: VertexArrayDesc) -> Result<Arc<dyn VertexArray>> {
        let Some(vertex_store) = self.find_buffer(&desc.vertex_buffer) else {
            batch_bail!("batch::mock", "vertex array '{}' uses a foreign vertex buffer", desc.name);
        };
        let index_store = match desc.index_buffer.as_ref() {
            Some(buffer) => match self.find_buffer(buffer) {
                Some(store) => Some(store),
                None => batch_bail!("batch::mock", "vertex array '{}' uses a foreign index buffer", desc.name),
            },
            None => None,
        };

        let vertex_array = Arc::new(MockVertexArray {
            name: desc.name.clone(),
            layout: desc.layout,
            vertex_buffer: desc.vertex_buffer,
            index_buffer: desc.index_buffer,
            vertex_store,
            index_store,
        });
        self.created_vertex_arrays.push(desc.name);
        self.vertex_arrays.push(vertex_array.clone());
        let handle: Arc<dyn VertexArray> = vertex_array;
        Ok(handle)
    }

    fn bind_shader(&mut self, shader: &Arc<dyn Shader>) -> Result<()> {
        self.commands.push(format!("bind_shader:{}", shader.path()));
        self.bound_shader = Some(shader.path().to_string());
        Ok(())
    }

    fn set_uniform_mat4(&mut self, shader: &Arc<dyn Shader>, name: &str, value: &Mat4) -> Result<()> {
        self.commands.push(format!("set_uniform_mat4:{}", name));
        self.mat4_uniforms.push((shader.path().to_string(), name.to_string(), *value));
        Ok(())
    }

    fn set_uniform_int_array(&mut self, shader: &Arc<dyn Shader>, name: &str, values: &[i32]) -> Result<()> {
        self.commands.push(format!("set_uniform_int_array:{}", name));
        self.int_array_uniforms.push((shader.path().to_string(), name.to_string(), values.to_vec()));
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.commands.push(format!("bind_texture:{}", slot));
        self.bound_textures.insert(slot, texture.id());
        Ok(())
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.commands.push("set_viewport".to_string());
        self.viewport = Some((x, y, width, height));
    }

    fn draw_indexed(&mut self, vertex_array: &Arc<dyn VertexArray>, index_count: u32) -> Result<()> {
        self.record_draw(vertex_array, true, index_count)
    }

    fn draw(&mut self, vertex_array: &Arc<dyn VertexArray>, vertex_count: u32) -> Result<()> {
        self.record_draw(vertex_array, false, vertex_count)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
