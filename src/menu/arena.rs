//! Generational handle arena backing native menu entries.
//!
//! A cleared or removed slot bumps its generation, so a stale handle fails
//! the liveness check instead of touching a recycled entry. This is what
//! makes in-flight icon loads safe across full menu rebuilds.

/// Opaque handle to a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage with generation tags.
#[derive(Debug)]
pub struct HandleArena<T> {
    slots: Vec<Slot<T>>,
    occupied: usize,
}

impl<T> HandleArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            occupied: 0,
        }
    }

    /// Store a value, reusing a free slot when one exists.
    pub fn insert(&mut self, value: T) -> ItemHandle {
        self.occupied += 1;

        if let Some(index) = self.slots.iter().position(|slot| slot.value.is_none()) {
            let slot = &mut self.slots[index];
            slot.value = Some(value);
            return ItemHandle {
                index: index as u32,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        ItemHandle {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: ItemHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Whether the handle still refers to a live value.
    pub fn contains(&self, handle: ItemHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Remove the value behind `handle`, invalidating it.
    pub fn remove(&mut self, handle: ItemHandle) -> Option<T> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)?;

        let value = slot.value.take()?;
        slot.generation += 1;
        self.occupied -= 1;
        Some(value)
    }

    /// Drop every value, invalidating all outstanding handles.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.value.take().is_some() {
                slot.generation += 1;
            }
        }
        self.occupied = 0;
    }

    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }
}

impl<T> Default for HandleArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get() {
        let mut arena = HandleArena::new();
        let handle = arena.insert("save");

        assert_eq!(arena.get(handle), Some(&"save"));
        assert!(arena.contains(handle));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_remove_invalidates() {
        let mut arena = HandleArena::new();
        let handle = arena.insert("save");

        assert_eq!(arena.remove(handle), Some("save"));
        assert!(!arena.contains(handle));
        assert_eq!(arena.remove(handle), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_clear_invalidates_all() {
        let mut arena = HandleArena::new();
        let first = arena.insert("save");
        let second = arena.insert("delete");

        arena.clear();

        assert!(!arena.contains(first));
        assert!(!arena.contains(second));
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_reused_slot_gets_fresh_generation() {
        let mut arena = HandleArena::new();
        let stale = arena.insert("save");
        arena.remove(stale);

        let fresh = arena.insert("delete");

        // Same physical slot, new generation: the stale handle must miss.
        assert!(!arena.contains(stale));
        assert_eq!(arena.get(stale), None);
        assert_eq!(arena.get(fresh), Some(&"delete"));
        assert_ne!(stale, fresh);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = HandleArena::new();
        let handle = arena.insert(1);

        *arena.get_mut(handle).unwrap() = 2;
        assert_eq!(arena.get(handle), Some(&2));
    }
}
