/// Model module - raw shape data, the shape library and the model loader

pub mod raw_shape;
pub mod shape_library;
pub mod model_loader;

pub use raw_shape::*;
pub use shape_library::*;
pub use model_loader::*;
