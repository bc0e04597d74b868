//! Dependency-keyed memoization.
//!
//! A [`Memo`] holds one cached value together with the dependency key it was
//! computed from. Asking for the value with an equal key returns the cache;
//! any other key recomputes and replaces it.

/// A single-slot cache keyed by its dependency tuple.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    recomputations: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            recomputations: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing it if the key changed.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let stale = !matches!(&self.slot, Some((cached, _)) if *cached == key);
        if stale {
            self.recomputations += 1;
            self.slot = None;
        }
        let (_, value) = self.slot.get_or_insert_with(|| (key, compute()));
        value
    }

    /// How many times the value has been computed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
