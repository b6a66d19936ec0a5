/// Shader trait and shader descriptor

/// Descriptor for creating a shader program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDesc {
    /// Source file path; also the key used by `ShaderLibrary`
    pub path: String,
}

/// Shader program trait
///
/// Uniform uploads go through `GraphicsDevice`, so the handle itself only
/// identifies the program.
pub trait Shader: Send + Sync {
    /// Path the program was built from
    fn path(&self) -> &str;
}
