/*!
# Batch Renderer

2D/3D batch renderer layered over an immediate-mode graphics API.

Application draw requests (quads, rotated quads, circles, textured primitives,
loaded 3D models) are accumulated into pre-allocated per-frame storage and
issued as few draw calls as possible: one per primitive family per scene,
plus transparent mid-scene flushes when the quad batch fills up.

The graphics API is reached only through the [`GraphicsDevice`] trait, so
the batcher runs unchanged over OpenGL, a command recorder or a test mock.

## Architecture

- **BatchRenderer**: scene lifecycle (`begin_scene` / `end_scene`), draw requests, unbatched `submit`
- **QuadBatch**: fixed vertex arena, precomputed index buffer, texture-slot table
- **PolyBatch**: per-frame 3D vertex list compiled into one vertex array
- **Expander**: TRS transforms and quad corner generation
- **Model loader**: raw shape data to world-space vertices
- **GraphicsDevice**: buffer, texture, shader and vertex-array factory plus draw submission

[`GraphicsDevice`]: graphics_device::GraphicsDevice
*/

// Internal modules
mod error;
mod config;
mod camera;
mod renderer;
mod shader_library;
pub mod log;
pub mod graphics_device;
pub mod geometry;
pub mod storage;
pub mod draw;
pub mod model;

// Main batch namespace module
pub mod batch {
    // Error types
    pub use crate::error::{Error, Result};

    // Renderer
    pub use crate::renderer::{
        BatchRenderer, RendererStats, SceneState,
        UNIFORM_TEXTURES, UNIFORM_TRANSFORM, UNIFORM_VIEW_PROJECTION,
    };

    // Configuration
    pub use crate::config::{
        RendererConfig, TextureExhaustion,
        DEFAULT_CIRCLE_SEGMENTS, DEFAULT_CIRCLE_STEP_DEGREES, DEFAULT_MAX_QUADS, MAX_TEXTURE_SLOTS,
    };

    // Camera
    pub use crate::camera::{Camera, ProjectionKind};

    // Shader library
    pub use crate::shader_library::ShaderLibrary;

    // Logging sub-module
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
        };
    }

    // Graphics device boundary
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Vertex records
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Draw requests and expansion
    pub mod draw {
        pub use crate::draw::*;
    }

    // Raw shapes and model loading
    pub mod model {
        pub use crate::model::*;
    }
}

// Re-export math library at crate root
pub use glam;
