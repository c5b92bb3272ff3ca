//! Transient per-item presentation state for the feed.
//!
//! Each rendered entry moves through `entering -> settled -> exiting ->
//! removed`. None of this is persisted; the entry store stays authoritative
//! while an item animates out, and the actual delete is committed by the
//! caller once [`FeedEffects::tick`] reports the exit as finished.

use std::collections::HashMap;

/// How long the entrance effect runs per item.
pub const ENTRANCE_MS: i64 = 600;
/// Extra entrance delay per feed position, so items cascade in.
pub const STAGGER_MS: i64 = 100;
/// How long an item animates out before its delete is committed.
pub const EXIT_MS: i64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    Entering,
    Settled,
    Exiting,
}

#[derive(Debug, Clone, Copy)]
struct ItemState {
    phase: ItemPhase,
    since: i64,
    delay: i64,
}

/// Animation state for every visible feed item, keyed by entry id.
#[derive(Debug, Default)]
pub struct FeedEffects {
    items: HashMap<String, ItemState>,
}

impl FeedEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item as entering. Already-tracked ids are untouched,
    /// so re-rendering never restarts an animation.
    pub fn track(&mut self, id: &str, delay: i64, now: i64) {
        self.items.entry(id.to_string()).or_insert(ItemState {
            phase: ItemPhase::Entering,
            since: now,
            delay,
        });
    }

    /// Untracked ids read as settled, so an item that outlives its
    /// animation record renders normally.
    pub fn phase(&self, id: &str) -> ItemPhase {
        self.items
            .get(id)
            .map(|s| s.phase)
            .unwrap_or(ItemPhase::Settled)
    }

    pub fn is_exiting(&self, id: &str) -> bool {
        self.phase(id) == ItemPhase::Exiting
    }

    /// Marks an item for removal. A repeat request while the item is
    /// already exiting is a no-op; the timer is not restarted and there
    /// is no way back to settled.
    pub fn begin_exit(&mut self, id: &str, now: i64) {
        let state = self.items.entry(id.to_string()).or_insert(ItemState {
            phase: ItemPhase::Settled,
            since: now,
            delay: 0,
        });
        if state.phase != ItemPhase::Exiting {
            *state = ItemState {
                phase: ItemPhase::Exiting,
                since: now,
                delay: 0,
            };
        }
    }

    /// Advances every animation to `now`. Entering items whose effect has
    /// run (delay + duration) settle; returns the ids whose exit effect
    /// has finished and whose deletion should now be committed.
    pub fn tick(&mut self, now: i64) -> Vec<String> {
        let mut finished = Vec::new();
        for (id, state) in self.items.iter_mut() {
            match state.phase {
                ItemPhase::Entering if now >= state.since + state.delay + ENTRANCE_MS => {
                    state.phase = ItemPhase::Settled;
                }
                ItemPhase::Exiting if now >= state.since + EXIT_MS => {
                    finished.push(id.clone());
                }
                _ => {}
            }
        }
        finished
    }

    /// Drops the record for an unmounted item.
    pub fn forget(&mut self, id: &str) {
        self.items.remove(id);
    }
}
