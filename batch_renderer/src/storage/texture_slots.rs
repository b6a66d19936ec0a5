/// Texture-slot table with per-scene deduplication.
///
/// Slot 0 always holds the white placeholder used by solid-colour fills.
/// Other slots are handed out in first-use order and stay stable until the
/// next `reset`. Identity is the backend `TextureId`.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graphics_device::Texture;

pub struct TextureSlots {
    slots: Vec<Arc<dyn Texture>>,
    capacity: usize,
}

impl TextureSlots {
    /// Create a table of `capacity` slots with `placeholder` in slot 0
    pub fn new(placeholder: Arc<dyn Texture>, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.push(placeholder);
        Self { slots, capacity }
    }

    /// Slot index of `texture`, binding it to the next free slot on first use.
    ///
    /// # Errors
    ///
    /// `TextureSlotsExhausted` when the texture is new and every slot is taken.
    /// The table is left unchanged in that case.
    pub fn resolve(&mut self, texture: &Arc<dyn Texture>) -> Result<usize> {
        if let Some(slot) = self.find(texture) {
            return Ok(slot);
        }
        if self.slots.len() >= self.capacity {
            return Err(Error::TextureSlotsExhausted { capacity: self.capacity });
        }
        self.slots.push(Arc::clone(texture));
        Ok(self.slots.len() - 1)
    }

    /// Slot already holding `texture`, if any (slot 0 is not searched)
    pub fn find(&self, texture: &Arc<dyn Texture>) -> Option<usize> {
        let id = texture.id();
        self.slots
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, bound)| bound.id() == id)
            .map(|(slot, _)| slot)
    }

    /// Drop every binding except the placeholder
    pub fn reset(&mut self) {
        self.slots.truncate(1);
    }

    /// Bound textures in slot order, placeholder first
    pub fn bound(&self) -> &[Arc<dyn Texture>] {
        &self.slots
    }

    /// Next free slot index (1 after a reset)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether only the placeholder is bound
    pub fn is_empty(&self) -> bool {
        self.slots.len() <= 1
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[path = "texture_slots_tests.rs"]
mod tests;
