//! Single-step undo.

/// Holds at most one snapshot of the state preceding the last mutation.
#[derive(Debug, Clone)]
pub struct UndoBuffer<T> {
    snapshot: Option<T>,
}

impl<T> Default for UndoBuffer<T> {
    fn default() -> Self {
        Self { snapshot: None }
    }
}

impl<T: Clone> UndoBuffer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any retained snapshot with `state`.
    pub fn capture(&mut self, state: &T) {
        self.snapshot = Some(state.clone());
    }

    /// Hand back the retained snapshot, leaving the buffer empty.
    pub fn take(&mut self) -> Option<T> {
        self.snapshot.take()
    }

    pub fn peek(&self) -> Option<&T> {
        self.snapshot.as_ref()
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_none()
    }
}
