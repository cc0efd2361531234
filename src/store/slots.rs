use std::collections::HashMap;
use std::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::store::dataset::Dataset;
use crate::store::loader::{self, DecodeError};

/// Identifies one scenario slot a capture summary can be loaded into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Canonical id for the n-th scenario slot (1-based)
    pub fn scenario(index: usize) -> Self {
        Self(format!("scenario-{}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Holds the decoded dataset for each scenario slot.
///
/// Replacement is last-good-wins: a slot only changes when the incoming
/// bytes decode cleanly, so a malformed upload leaves the previously
/// accepted dataset untouched.
#[derive(Debug, Default)]
pub struct RecordStore {
    slots: HashMap<SlotId, Dataset>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `raw` and install it in `slot`, replacing any prior dataset.
    /// On decode failure the slot keeps its current contents.
    pub fn set_dataset(&mut self, slot: &SlotId, raw: &[u8]) -> Result<(), DecodeError> {
        match loader::parse_csv(raw) {
            Ok(dataset) => {
                info!(
                    "slot {}: loaded {} rows, {} columns",
                    slot,
                    dataset.row_count(),
                    dataset.columns().len()
                );
                self.slots.insert(slot.clone(), dataset);
                Ok(())
            }
            Err(e) => {
                warn!("slot {}: upload rejected: {}", slot, e);
                Err(e)
            }
        }
    }

    /// Currently stored dataset for `slot`, if any upload ever succeeded
    pub fn dataset(&self, slot: &SlotId) -> Option<&Dataset> {
        self.slots.get(slot)
    }

    pub fn has_dataset(&self, slot: &SlotId) -> bool {
        self.slots.contains_key(slot)
    }

    /// Number of slots holding a dataset
    pub fn loaded_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "Time,Protocol,Length\n0.0,TCP,60\n0.1,DNS,73\n";
    const SECOND: &str = "Time,Protocol,Length\n0.0,MQTT,54\n";

    #[test]
    fn test_slot_ids() {
        assert_eq!(SlotId::scenario(1).as_str(), "scenario-1");
        assert_eq!(SlotId::scenario(2).to_string(), "scenario-2");
        assert_eq!(SlotId::new("scenario-1"), SlotId::scenario(1));
    }

    #[test]
    fn test_empty_store_serves_nothing() {
        let store = RecordStore::new();
        assert!(store.dataset(&SlotId::scenario(1)).is_none());
        assert_eq!(store.loaded_count(), 0);
    }

    #[test]
    fn test_set_and_get_dataset() {
        let mut store = RecordStore::new();
        let slot = SlotId::scenario(1);
        store.set_dataset(&slot, FIRST.as_bytes()).unwrap();

        let ds = store.dataset(&slot).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert!(store.has_dataset(&slot));
        assert!(!store.has_dataset(&SlotId::scenario(2)));
    }

    #[test]
    fn test_successful_upload_replaces_previous() {
        let mut store = RecordStore::new();
        let slot = SlotId::scenario(1);
        store.set_dataset(&slot, FIRST.as_bytes()).unwrap();
        store.set_dataset(&slot, SECOND.as_bytes()).unwrap();

        let ds = store.dataset(&slot).unwrap();
        assert_eq!(ds.row_count(), 1);
        assert_eq!(ds.rows()[0][1], "MQTT");
    }

    #[test]
    fn test_failed_upload_keeps_previous_dataset() {
        let mut store = RecordStore::new();
        let slot = SlotId::scenario(1);
        store.set_dataset(&slot, FIRST.as_bytes()).unwrap();

        let err = store.set_dataset(&slot, &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidUtf8(_)));

        let ds = store.dataset(&slot).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows()[0][1], "TCP");
    }

    #[test]
    fn test_slots_are_independent() {
        let mut store = RecordStore::new();
        store.set_dataset(&SlotId::scenario(1), FIRST.as_bytes()).unwrap();
        store.set_dataset(&SlotId::scenario(2), SECOND.as_bytes()).unwrap();

        assert_eq!(store.dataset(&SlotId::scenario(1)).unwrap().row_count(), 2);
        assert_eq!(store.dataset(&SlotId::scenario(2)).unwrap().row_count(), 1);
        assert_eq!(store.loaded_count(), 2);
    }
}
