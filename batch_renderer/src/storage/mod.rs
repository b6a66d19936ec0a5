/// Storage module - per-frame batch storage for the 2D and 3D families

pub mod vertex_arena;
pub mod texture_slots;
pub mod quad_batch;
pub mod poly_batch;

pub use vertex_arena::*;
pub use texture_slots::*;
pub use quad_batch::*;
pub use poly_batch::*;
