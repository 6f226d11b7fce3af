//! The user's favorite entries, persisted on every change.
//!
//! Favorites are matched by [`EventKey`] only. The list keeps insertion order
//! and a key index for constant-time membership.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{HistoryError, HistoryResult};
use crate::event::{EventKey, HistoricalEvent};
use crate::storage::{FAVORITES_KEY, Storage};

pub struct FavoritesStore<S: Storage> {
    storage: S,
    events: Vec<HistoricalEvent>,
    keys: HashSet<EventKey>,
}

impl<S: Storage> FavoritesStore<S> {
    /// Load favorites from `storage`. A missing, unreadable or corrupt value
    /// yields an empty store.
    pub fn load(storage: S) -> Self {
        let events = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => parse_stored(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read favorites, starting empty");
                Vec::new()
            }
        };

        let mut store = FavoritesStore {
            storage,
            events: Vec::new(),
            keys: HashSet::new(),
        };
        // Collapse duplicates a hand-edited file may contain
        for event in events {
            if store.keys.insert(event.key()) {
                store.events.push(event);
            }
        }
        debug!(count = store.events.len(), "favorites loaded");
        store
    }

    pub fn is_favorite(&self, event: &HistoricalEvent) -> bool {
        self.keys.contains(&event.key())
    }

    /// Add `event` unless an entry with the same identity is already stored.
    /// Returns whether it was added.
    pub fn add(&mut self, event: HistoricalEvent) -> HistoryResult<bool> {
        if self.is_favorite(&event) {
            return Ok(false);
        }

        let mut next = self.events.clone();
        next.push(event);
        self.commit(next)?;
        Ok(true)
    }

    /// Remove every entry with the identity of `event`.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, event: &HistoricalEvent) -> HistoryResult<bool> {
        let next: Vec<HistoricalEvent> = self
            .events
            .iter()
            .filter(|fav| !fav.same_event(event))
            .cloned()
            .collect();
        let removed = next.len() != self.events.len();
        self.commit(next)?;
        Ok(removed)
    }

    /// Add when absent, remove when present. Returns the new favorite status.
    pub fn toggle(&mut self, event: HistoricalEvent) -> HistoryResult<bool> {
        if self.is_favorite(&event) {
            self.remove(&event)?;
            Ok(false)
        } else {
            self.add(event)?;
            Ok(true)
        }
    }

    pub fn clear(&mut self) -> HistoryResult<()> {
        self.commit(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoricalEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[HistoricalEvent] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&HistoricalEvent> {
        self.events.get(index)
    }

    /// Write the full list, then swap it in. A failed write leaves the store
    /// untouched.
    fn commit(&mut self, next: Vec<HistoricalEvent>) -> HistoryResult<()> {
        let serialized = serde_json::to_string(&next)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;
        self.storage.set(FAVORITES_KEY, &serialized)?;

        self.keys = next.iter().map(HistoricalEvent::key).collect();
        self.events = next;
        Ok(())
    }
}

fn parse_stored(raw: &str) -> Vec<HistoricalEvent> {
    match serde_json::from_str(raw) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "stored favorites are malformed, starting empty");
            Vec::new()
        }
    }
}
