/// Deferred cosmetic actions keyed by session generation
use std::time::{Duration, Instant};

use crate::pyramid::session::GamePhase;
use crate::pyramid::word::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Move the phase forward once the solved-word glow has played
    CommitPhase { from: GamePhase, to: GamePhase },
    ClearLetterGlow { word: Word, index: usize },
    ClearWordGlow { word: Word },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred {
    pub due: Instant,
    pub generation: u64,
    pub action: DeferredAction,
}

/// Pending actions, fired in deadline order.
///
/// The queue itself never checks staleness; the session compares each entry's
/// generation against its own when the entry comes due.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<Deferred>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, generation: u64, action: DeferredAction) {
        self.schedule_at(Instant::now() + delay, generation, action);
    }

    pub fn schedule_at(&mut self, due: Instant, generation: u64, action: DeferredAction) {
        // Stable insert keeps equal deadlines in scheduling order.
        let at = self.pending.partition_point(|d| d.due <= due);
        self.pending.insert(at, Deferred { due, generation, action });
    }

    /// Remove and return every entry due at or before `now`
    pub fn take_due(&mut self, now: Instant) -> Vec<Deferred> {
        let split = self.pending.partition_point(|d| d.due <= now);
        self.pending.drain(..split).collect()
    }

    pub fn has_pending(&self, pred: impl Fn(&Deferred) -> bool) -> bool {
        self.pending.iter().any(pred)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
