/// Shape library - model name to parsed raw shape

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::model::RawShape;

#[derive(Debug, Default)]
pub struct ShapeLibrary {
    shapes: FxHashMap<String, RawShape>,
}

impl ShapeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `shape` under `name`, returning the shape it replaced
    pub fn add(&mut self, name: impl Into<String>, shape: RawShape) -> Option<RawShape> {
        self.shapes.insert(name.into(), shape)
    }

    /// Shape registered under `name`
    ///
    /// # Errors
    ///
    /// `UnknownShape` when nothing is registered under that name.
    pub fn get(&self, name: &str) -> Result<&RawShape> {
        self.shapes
            .get(name)
            .ok_or_else(|| Error::UnknownShape(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<RawShape> {
        self.shapes.remove(name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.shapes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
#[path = "shape_library_tests.rs"]
mod tests;
