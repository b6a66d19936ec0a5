/// Geometry module - per-vertex records for 2D quads and 3D polygons

pub mod vertex;

pub use vertex::*;
