/// Draw module - draw requests and their expansion into quad vertices

pub mod request;
pub mod expander;

pub use request::*;
pub use expander::*;
