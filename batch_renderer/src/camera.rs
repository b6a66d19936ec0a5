/// Camera - passive data container handed to `begin_scene`.
///
/// The Camera computes nothing. The caller is responsible for computing the
/// view and projection matrices (orbit controllers, zoom, aspect ratio, ...).
/// The renderer only reads the combined view-projection matrix and the
/// projection kind, which decides which shaders receive the upload.

use glam::Mat4;

/// Kind of projection a camera uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    /// 2D camera: only the texture shader receives the matrix
    Orthographic,
    /// 3D camera: texture and lighting shaders both receive the matrix
    Perspective,
}

/// Low-level camera. A passive data container.
#[derive(Debug, Clone)]
pub struct Camera {
    kind: ProjectionKind,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    /// Create a camera from precomputed matrices
    pub fn new(kind: ProjectionKind, view: Mat4, projection: Mat4) -> Self {
        Self {
            kind,
            view_matrix: view,
            projection_matrix: projection,
        }
    }

    /// Orthographic camera with an identity view
    pub fn orthographic(projection: Mat4) -> Self {
        Self::new(ProjectionKind::Orthographic, Mat4::IDENTITY, projection)
    }

    /// Perspective camera
    pub fn perspective(view: Mat4, projection: Mat4) -> Self {
        Self::new(ProjectionKind::Perspective, view, projection)
    }

    // ===== GETTERS =====

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    /// World to eye space
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Eye to clip space
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// `projection * view`, the matrix uploaded as `u_ViewProjection`
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    // ===== SETTERS =====

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
