use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::foundation::core::Millis;

/// Events the controller schedules against the run clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EventKind {
    /// The initial settle delay elapsed; the reveal phase may begin.
    SettleElapsed,
    /// One tile's scheduled delay elapsed.
    TileReveal {
        /// Index into the tile set, grid (row-major) order.
        grid_index: u32,
    },
    /// The whole-layer terminal delay elapsed.
    TerminalElapsed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    due: Millis,
    seq: u64,
    kind: EventKind,
}

// Ordering ignores `kind`: entries fire by deadline, and equal deadlines
// fire in schedule order. That is the determinism rule for the whole engine.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Deterministic single-threaded timer queue.
///
/// Logical concurrency only: many entries may be pending at once, but each
/// fires atomically with respect to all others when the owner pumps
/// [`pop_due`](TimerQueue::pop_due).
#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TimerQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schedule(&mut self, due: Millis, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due, seq, kind }));
    }

    /// Pop the next entry with `due <= now`, earliest (then oldest) first.
    pub(crate) fn pop_due(&mut self, now: Millis) -> Option<(Millis, EventKind)> {
        let Reverse(head) = self.heap.peek()?;
        if head.due > now {
            return None;
        }
        let Reverse(entry) = self.heap.pop()?;
        Some((entry.due, entry.kind))
    }

    /// Drop every pending entry. Used by teardown.
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }

    pub(crate) fn pending(&self) -> usize {
        self.heap.len()
    }
}
