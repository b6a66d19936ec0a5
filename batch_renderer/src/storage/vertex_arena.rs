/// Fixed-capacity vertex arena with a bounds-checked write cursor.
///
/// The arena is allocated once and never grows. `push` refuses to write past
/// the end and hands the vertex back, so the owner decides when to flush.
/// `reset` rewinds the cursor without touching the storage.
///
/// # Example
///
/// ```ignore
/// let mut arena = VertexArena::<QuadVertex>::new(8);
/// arena.push(vertex)?;           // cursor = 1
/// let bytes = arena.as_bytes();  // 44 bytes
/// arena.reset();                 // cursor = 0
/// ```

use bytemuck::Pod;

pub struct VertexArena<T: Pod> {
    storage: Vec<T>,
    capacity: usize,
}

impl<T: Pod> VertexArena<T> {
    /// Create an empty arena holding at most `capacity` vertices
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one vertex.
    ///
    /// Returns the vertex back in `Err` when the arena is full.
    pub fn push(&mut self, vertex: T) -> std::result::Result<(), T> {
        if self.storage.len() >= self.capacity {
            return Err(vertex);
        }
        self.storage.push(vertex);
        Ok(())
    }

    /// Append several vertices, all or nothing.
    ///
    /// Returns `false` and writes nothing when they do not all fit.
    pub fn extend_from_slice(&mut self, vertices: &[T]) -> bool {
        if !self.has_room_for(vertices.len()) {
            return false;
        }
        self.storage.extend_from_slice(vertices);
        true
    }

    /// Whether `count` more vertices fit
    pub fn has_room_for(&self, count: usize) -> bool {
        self.remaining() >= count
    }

    /// Rewind the write cursor to the arena start
    pub fn reset(&mut self) {
        self.storage.clear();
    }

    /// Current write cursor (vertices written since the last reset)
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.storage.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.storage.len()
    }

    /// Vertices written since the last reset
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    /// Written vertices as raw bytes, ready for `Buffer::update`
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.storage)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "vertex_arena_tests.rs"]
mod tests;
