//! String interning for task ids.
//!
//! Maps task id strings to dense integer indices so graph walks can use plain
//! vectors for their mark sets.

use rustc_hash::FxHashMap;

/// Interned task id (u32 for compact storage and fast hashing).
pub type TaskIdInt = u32;

/// String interner that maps task id strings to integers.
#[derive(Debug, Clone)]
pub struct TaskIdInterner<'a> {
    to_int: FxHashMap<&'a str, TaskIdInt>,
    from_int: Vec<&'a str>,
}

impl<'a> TaskIdInterner<'a> {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Intern every id in order. With unique ids the integer equals the position.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: ExactSizeIterator,
    {
        let ids = ids.into_iter();
        let mut interner = Self::with_capacity(ids.len());
        for id in ids {
            interner.intern(id);
        }
        interner
    }

    /// Intern a string, returning its integer id.
    /// If already interned, returns the existing id.
    pub fn intern(&mut self, s: &'a str) -> TaskIdInt {
        if let Some(&id) = self.to_int.get(s) {
            return id;
        }
        let id = self.from_int.len() as TaskIdInt;
        self.from_int.push(s);
        self.to_int.insert(s, id);
        id
    }

    #[inline]
    pub fn get(&self, s: &str) -> Option<TaskIdInt> {
        self.to_int.get(s).copied()
    }

    #[inline]
    pub fn resolve(&self, id: TaskIdInt) -> Option<&'a str> {
        self.from_int.get(id as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let mut interner = TaskIdInterner::with_capacity(10);

        let id1 = interner.intern("task_a");
        let id2 = interner.intern("task_b");
        let id3 = interner.intern("task_a"); // duplicate

        assert_eq!(id1, id3);
        assert_ne!(id1, id2);

        assert_eq!(interner.resolve(id1), Some("task_a"));
        assert_eq!(interner.resolve(id2), Some("task_b"));
        assert_eq!(interner.get("task_a"), Some(id1));
        assert_eq!(interner.get("nonexistent"), None);
    }

    #[test]
    fn test_from_ids_preserves_positions() {
        let ids = ["x", "y", "z"];
        let interner = TaskIdInterner::from_ids(ids.iter().copied());
        assert_eq!(interner.get("z"), Some(2));
        assert_eq!(interner.resolve(3), None);
    }
}
