//! Operation replay guard.
//!
//! Contexts carry no nonce, so two identical requests encode identically.
//! The guard is keyed by the SHA-256 of a caller-supplied operation id
//! instead.
//!
//! Memory is bounded with two generations rather than per-entry eviction
//! order: new claims go into `current`, and once it holds half the
//! capacity it becomes `previous` and the old `previous` is dropped
//! wholesale. Every claim is remembered for at least `capacity / 2 - 1`
//! further claims.

use std::collections::HashSet;
use std::mem;

/// SHA-256 of an operation id.
pub type OperationKey = [u8; 32];

/// Remembers recently settled operations.
#[derive(Debug, Clone)]
pub struct ReplayGuard {
    current: HashSet<OperationKey>,
    previous: HashSet<OperationKey>,
    /// Claims per generation.
    generation_size: usize,
}

impl ReplayGuard {
    /// A guard holding at most `capacity` keys.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let generation_size = (capacity / 2).max(1);
        Self {
            current: HashSet::with_capacity(generation_size),
            previous: HashSet::new(),
            generation_size,
        }
    }

    /// Insert `key` unless it is already remembered.
    ///
    /// Returns `false` if `key` was present, leaving the guard unchanged.
    pub fn claim(&mut self, key: OperationKey) -> bool {
        if self.previous.contains(&key) || !self.current.insert(key) {
            return false;
        }
        if self.current.len() >= self.generation_size {
            self.previous = mem::take(&mut self.current);
        }
        true
    }

    /// Forget a claim whose settlement did not complete.
    pub fn release(&mut self, key: &OperationKey) {
        if !self.current.remove(key) {
            self.previous.remove(key);
        }
    }

    #[must_use]
    pub fn contains(&self, key: &OperationKey) -> bool {
        self.current.contains(key) || self.previous.contains(key)
    }

    /// Number of keys currently remembered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len() + self.previous.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
