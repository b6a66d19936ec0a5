/// Shader library - shader file path to created shader program

use std::sync::Arc;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, Shader, ShaderDesc};

#[derive(Default)]
pub struct ShaderLibrary {
    shaders: FxHashMap<String, Arc<dyn Shader>>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shader built from `path`, created on `device` on first use
    pub fn load(&mut self, device: &mut dyn GraphicsDevice, path: &str) -> Result<Arc<dyn Shader>> {
        if let Some(shader) = self.shaders.get(path) {
            return Ok(Arc::clone(shader));
        }
        let shader = device.create_shader(ShaderDesc { path: path.to_string() })?;
        crate::batch_debug!("batch::ShaderLibrary", "Loaded shader '{}'", path);
        self.shaders.insert(path.to_string(), Arc::clone(&shader));
        Ok(shader)
    }

    pub fn get(&self, path: &str) -> Option<&Arc<dyn Shader>> {
        self.shaders.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.shaders.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }
}

#[cfg(test)]
#[path = "shader_library_tests.rs"]
mod tests;
