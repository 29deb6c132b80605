use std::collections::HashMap;

/// Opaque handle to a GPU mesh owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u64);

/// Handle store mapping opaque handles to GPU resources.
/// Handles start at 1 and are never reused within a store.
pub struct HandleStore<T> {
    items: HashMap<u64, T>,
    next: u64,
}

impl<T> HandleStore<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            next: 1,
        }
    }

    /// Insert an item and return its handle.
    pub fn insert(&mut self, item: T) -> MeshHandle {
        let handle = self.next;
        self.next += 1;
        self.items.insert(handle, item);
        MeshHandle(handle)
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&T> {
        self.items.get(&handle.0)
    }
}

impl<T> Default for HandleStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_distinct() {
        let mut store = HandleStore::new();
        let a = store.insert("sphere");
        let b = store.insert("ground");
        assert_ne!(a, b);
        assert_eq!(store.get(a), Some(&"sphere"));
        assert_eq!(store.get(b), Some(&"ground"));
    }

    #[test]
    fn test_unknown_handle_is_none() {
        let mut other = HandleStore::new();
        let foreign = other.insert(1u32);
        let mut store: HandleStore<u32> = HandleStore::new();
        store.insert(7);
        assert!(store.get(MeshHandle(foreign.0 + 10)).is_none());
    }
}
