//! Error types for the batch renderer
//!
//! This module defines the error types used throughout the crate,
//! including graphics device failures, scene discipline violations
//! and malformed model data.

use std::fmt;

/// Result type for batch renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Batch renderer errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Graphics device error (creation failure, poisoned lock, etc.)
    BackendError(String),

    /// Invalid resource (texture, buffer, shader, vertex array)
    InvalidResource(String),

    /// Initialization failed (renderer, storage)
    InitializationFailed(String),

    /// Renderer configuration rejected before any allocation
    InvalidConfig(String),

    /// `begin_scene` called while a scene is already open
    SceneAlreadyOpen,

    /// Draw or end call issued with no open scene
    NoOpenScene,

    /// More distinct textures in one batch than texture slots available
    TextureSlotsExhausted {
        /// Number of slots in the table (slot 0 included)
        capacity: usize,
    },

    /// No shape registered under this name
    UnknownShape(String),

    /// A mesh index points outside its attribute array
    MalformedModel {
        /// Name the shape was registered under
        name: String,
        /// Shape (sub-object) inside the model
        shape: String,
        /// What was out of range
        detail: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::SceneAlreadyOpen => write!(f, "Scene already open: call end_scene() first"),
            Error::NoOpenScene => write!(f, "No open scene: call begin_scene() first"),
            Error::TextureSlotsExhausted { capacity } => {
                write!(f, "Texture slots exhausted ({} slots)", capacity)
            }
            Error::UnknownShape(name) => write!(f, "Unknown shape '{}'", name),
            Error::MalformedModel { name, shape, detail } => {
                write!(f, "Malformed model '{}' (shape '{}'): {}", name, shape, detail)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
