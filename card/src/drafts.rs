//! Local draft list: named cards kept in browser session storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor keeps a per-tab list of cards the user named, so they can be
//! reopened without a round trip to the persistence service. The whole list
//! is one JSON array under [`DRAFTS_KEY`]; single-tab access is assumed, so
//! there is no locking or merge.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail: unreadable or corrupt storage reads as an empty list and
//! is logged. Writes return [`DraftError`] so the caller can tell the user.
//! A clock reading outside the representable date range is stamped as the
//! Unix epoch.

#[cfg(test)]
#[path = "drafts_test.rs"]
mod drafts_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::clock::Clock;
use crate::doc::CardFields;

/// Storage key holding the serialized draft list.
pub const DRAFTS_KEY: &str = "userCards";

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("draft storage unavailable: {0}")]
    Unavailable(String),
    #[error("draft storage write failed: {0}")]
    Write(String),
    #[error("draft serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value storage (the shape of the Web Storage API).
pub trait DraftStorage {
    /// Read `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write (e.g. quota).
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DraftError>;
}

impl<S: DraftStorage + ?Sized> DraftStorage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DraftError> {
        (**self).set_item(key, value)
    }
}

/// In-process storage for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DraftError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One named draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCard {
    pub id: Uuid,
    pub name: String,
    pub data: CardFields,
    /// Stored as an RFC 3339 string, e.g. `2025-02-14T09:30:00.123Z`.
    #[serde(with = "time::serde::rfc3339")]
    pub last_modified: OffsetDateTime,
}

/// Keyed CRUD over the draft list.
pub struct DraftList<S: DraftStorage, C: Clock> {
    storage: S,
    clock: C,
}

impl<S: DraftStorage, C: Clock> DraftList<S, C> {
    #[must_use]
    pub fn new(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    /// All drafts in insertion order.
    #[must_use]
    pub fn get_all(&self) -> Vec<SavedCard> {
        let raw = match self.storage.get_item(DRAFTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("failed to read drafts: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(cards) => cards,
            Err(e) => {
                log::error!("discarding unreadable drafts: {e}");
                Vec::new()
            }
        }
    }

    /// Insert a new draft, or replace the one with `existing_id`.
    ///
    /// An `existing_id` that is not in the list is inserted under that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be serialized or written.
    pub fn save(&mut self, name: &str, data: CardFields, existing_id: Option<Uuid>) -> Result<SavedCard, DraftError> {
        let mut cards = self.get_all();
        let saved = SavedCard {
            id: existing_id.unwrap_or_else(Uuid::new_v4),
            name: name.to_owned(),
            data,
            last_modified: timestamp(self.clock.now_ms()),
        };

        match cards.iter_mut().find(|c| c.id == saved.id) {
            Some(slot) => *slot = saved.clone(),
            None => cards.push(saved.clone()),
        }
        self.write(&cards)?;
        Ok(saved)
    }

    #[must_use]
    pub fn get_by_id(&self, id: Uuid) -> Option<SavedCard> {
        self.get_all().into_iter().find(|c| c.id == id)
    }

    /// Remove the draft with `id`. Removing an unknown id is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written.
    pub fn delete(&mut self, id: Uuid) -> Result<(), DraftError> {
        let mut cards = self.get_all();
        cards.retain(|c| c.id != id);
        self.write(&cards)
    }

    fn write(&mut self, cards: &[SavedCard]) -> Result<(), DraftError> {
        let raw = serde_json::to_string(cards)?;
        self.storage.set_item(DRAFTS_KEY, &raw)
    }
}

/// Whole milliseconds since the Unix epoch as a UTC timestamp.
fn timestamp(now_ms: f64) -> OffsetDateTime {
    #[allow(clippy::cast_possible_truncation)]
    let ms = now_ms.round() as i128;
    match ms.checked_mul(1_000_000).map(OffsetDateTime::from_unix_timestamp_nanos) {
        Some(Ok(stamp)) => stamp,
        _ => {
            log::warn!("clock reading {now_ms} out of range, stamping the epoch");
            OffsetDateTime::UNIX_EPOCH
        }
    }
}
