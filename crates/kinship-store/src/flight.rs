//! Per-key single-flight tokens.
//!
//! Every mutation of a key takes a fresh, strictly increasing sequence number
//! and becomes the key's only live flight. Starting a new flight supersedes
//! the previous one; responses carrying a superseded sequence are stale.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

#[derive(Debug, Clone)]
pub struct FlightSlots<K> {
    next_seq: u64,
    live: HashMap<K, u64>,
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> FlightSlots<K> {
    pub fn new() -> Self {
        Self {
            next_seq: 1,
            live: HashMap::new(),
        }
    }

    /// Start a flight for `key`, superseding any live one.
    pub fn begin(&mut self, key: &K) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(prev) = self.live.insert(key.clone(), seq) {
            trace!(?key, prev, seq, "Superseding in-flight mutation");
        }
        seq
    }

    /// Whether `seq` is the live flight for `key`.
    pub fn is_live(&self, key: &K, seq: u64) -> bool {
        self.live.get(key) == Some(&seq)
    }

    /// Whether any flight is live for `key`.
    pub fn in_flight(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// Close the flight if `seq` is still live. Returns whether it was.
    pub fn land(&mut self, key: &K, seq: u64) -> bool {
        if self.is_live(key, seq) {
            self.live.remove(key);
            true
        } else {
            false
        }
    }

    /// Highest sequence handed out so far, or 0 before the first flight.
    pub fn high_water(&self) -> u64 {
        self.next_seq - 1
    }

    /// Forget flights for keys that no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.live.retain(|k, _| keep(k));
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> Default for FlightSlots<K> {
    fn default() -> Self {
        Self::new()
    }
}
