//! The saved location list and its current selection
//!
//! [`LocationStore`] is the only writer of the list and the current index.
//! Every mutation keeps two invariants:
//! - no two entries share the same `(lat, lon)`
//! - the current index is in `0..len` whenever the list is non-empty
//!
//! Out-of-range indices are silently ignored: operations report whether they
//! did anything instead of failing.

use std::collections::BTreeSet;

use super::{Coordinate, ResolvedLocation};

/// What [`LocationStore::merge`] did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Appended as a new entry at this index.
    Inserted(usize),
    /// Matched an existing entry whose empty state was filled in.
    Enriched(usize),
    /// Matched an existing entry, which was left untouched.
    Existing(usize),
}

impl MergeOutcome {
    /// Position of the merged entry, whether it was added or updated.
    pub fn index(self) -> usize {
        match self {
            MergeOutcome::Inserted(i) | MergeOutcome::Enriched(i) | MergeOutcome::Existing(i) => i,
        }
    }

    /// Whether the list itself was modified.
    pub fn mutated(self) -> bool {
        !matches!(self, MergeOutcome::Existing(_))
    }
}

/// Ordered, deduplicated list of saved places plus the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationStore {
    locations: Vec<ResolvedLocation>,
    current: usize,
}

impl LocationStore {
    /// Create a new, empty store with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted values.
    ///
    /// Later duplicates of a coordinate are dropped and a stale index is
    /// clamped into range.
    pub fn from_parts(locations: Vec<ResolvedLocation>, current: usize) -> Self {
        let mut store = Self::new();
        for location in locations {
            if store.position(&location.coord).is_none() {
                store.locations.push(location);
            }
        }
        store.current = current.min(store.locations.len().saturating_sub(1));
        store
    }

    /// Saved places in display order.
    pub fn locations(&self) -> &[ResolvedLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Current index, or `None` while the list is empty.
    pub fn current_index(&self) -> Option<usize> {
        if self.locations.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    /// The currently selected place.
    pub fn current(&self) -> Option<&ResolvedLocation> {
        self.current_index().and_then(|i| self.locations.get(i))
    }

    /// Coordinate of the current place.
    pub fn current_coord(&self) -> Option<Coordinate> {
        self.current().map(|location| location.coord)
    }

    /// Identity strings of every saved place, for the tracked-id set.
    pub fn tracked_ids(&self) -> BTreeSet<String> {
        self.locations.iter().map(|l| l.coord.id()).collect()
    }

    fn position(&self, coord: &Coordinate) -> Option<usize> {
        self.locations.iter().position(|l| l.same_place(coord))
    }

    /// Fold a freshly resolved place into the list and select it.
    ///
    /// A known coordinate only ever gains a state it was missing; it never
    /// loses one and never gets duplicated.
    pub fn merge(&mut self, candidate: ResolvedLocation) -> MergeOutcome {
        let outcome = match self.position(&candidate.coord) {
            None => {
                self.locations.push(candidate);
                MergeOutcome::Inserted(self.locations.len() - 1)
            }
            Some(index) => {
                let existing = &mut self.locations[index];
                if existing.state.is_empty() && !candidate.state.is_empty() {
                    existing.state = candidate.state;
                    MergeOutcome::Enriched(index)
                } else {
                    MergeOutcome::Existing(index)
                }
            }
        };

        self.current = outcome.index();
        tracing::info!(?outcome, total = self.locations.len(), "merged location");
        outcome
    }

    /// Select the entry at `index`. Out of range is a no-op.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.locations.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Delete the entry at `index`. Out of range is a no-op.
    ///
    /// Removing at or before the current index moves the selection back by
    /// one so it keeps pointing at the same neighbour. The result is always
    /// clamped into the shortened list.
    pub fn remove(&mut self, index: usize) -> Option<ResolvedLocation> {
        if index >= self.locations.len() {
            return None;
        }

        let removed = self.locations.remove(index);
        if index <= self.current {
            self.current = self.current.saturating_sub(1);
        }
        self.current = self.current.min(self.locations.len().saturating_sub(1));
        Some(removed)
    }

    /// Move the entry at `from` to position `to`, keeping the selection on
    /// the same place. Out of range is a no-op.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.locations.len();
        if from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }

        let selected = self.current;
        let entry = self.locations.remove(from);
        self.locations.insert(to, entry);

        self.current = if selected == from {
            to
        } else if from < selected && selected <= to {
            selected - 1
        } else if to <= selected && selected < from {
            selected + 1
        } else {
            selected
        };
        true
    }
}
