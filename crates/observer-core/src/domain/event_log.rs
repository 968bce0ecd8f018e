//! Envelope history.
//!
//! Every decoded envelope is recorded, whether or not it changed state.
//! The log is a ring buffer: once `capacity` entries are held, the oldest is
//! evicted for each new one. A capacity of zero disables the bound.

use std::collections::VecDeque;

use serde::Serialize;
use shared_types::Envelope;

/// One recorded envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedEnvelope {
    /// Monotonic across the whole session, including across resets.
    pub seq: u64,
    /// Connection epoch the envelope arrived in.
    pub epoch: u64,
    pub envelope: Envelope,
}

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LoggedEnvelope>,
    capacity: usize,
    evicted: u64,
    next_seq: u64,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        // Cap the up-front allocation; a large bound fills in lazily.
        let initial = if capacity == 0 { 64 } else { capacity.min(1024) };
        Self {
            entries: VecDeque::with_capacity(initial),
            capacity,
            evicted: 0,
            next_seq: 0,
        }
    }

    /// Append an envelope, evicting the oldest if full. Returns its sequence number.
    pub fn push(&mut self, epoch: u64, envelope: Envelope) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        if self.capacity > 0 && self.entries.len() >= self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(LoggedEnvelope {
            seq,
            epoch,
            envelope,
        });
        seq
    }

    /// Drop all entries. Sequence numbering continues.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.evicted = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoggedEnvelope> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dropped to respect the capacity since the last clear.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
