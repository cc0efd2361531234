use log::info;

use crate::config::settings::Config;
use crate::store::loader::{self, DecodeError};
use crate::store::slots::{RecordStore, SlotId};
use crate::view::selector::{self, PLACEHOLDER_TEXT};
use crate::view::tree::ViewTree;

/// Transport of an uploaded capture summary
#[derive(Debug, Clone, PartialEq)]
pub enum UploadPayload {
    /// Raw CSV bytes, e.g. read from a file path
    Raw(Vec<u8>),
    /// Browser-style `data:<mime>;base64,<payload>` contents string
    EncodedContents(String),
}

/// Inputs the dashboard reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The active tab changed to the given tab value
    TabChanged(String),
    /// A different scenario slot was selected
    SlotSelected(SlotId),
    /// A capture summary arrived for a slot
    UploadReceived {
        slot: SlotId,
        payload: UploadPayload,
    },
}

/// Everything retained between events: the active tab value and the
/// selected scenario slot, nothing else
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub active_tab: String,
    pub selected_slot: SlotId,
}

impl DashboardState {
    pub fn new(active_tab: impl Into<String>, selected_slot: SlotId) -> Self {
        Self {
            active_tab: active_tab.into(),
            selected_slot,
        }
    }
}

/// Apply one event and recompute the view for the resulting state.
///
/// The store is the only thing mutated, and only by an accepted upload.
/// Replaying the same event against the same state and slot contents
/// returns the same state and tree. A rejected upload surfaces as a notice
/// in front of the otherwise unchanged view; the next valid interaction
/// proceeds normally.
pub fn reduce(
    event: DashboardEvent,
    prior: &DashboardState,
    store: &mut RecordStore,
    config: &Config,
) -> (DashboardState, ViewTree) {
    let mut state = prior.clone();
    let mut upload_notice = None;

    match event {
        DashboardEvent::TabChanged(tab) => {
            info!("tab changed to {}", tab);
            state.active_tab = tab;
        }
        DashboardEvent::SlotSelected(slot) => {
            info!("slot {} selected", slot);
            state.selected_slot = slot;
        }
        DashboardEvent::UploadReceived { slot, payload } => {
            if let Err(e) = apply_upload(store, &slot, payload) {
                upload_notice = Some(format!("Upload to {} rejected: {}", slot, e));
            }
        }
    }

    // A slot with no upload and a slot holding a zero-row dataset both
    // count as empty selections
    let mut tree = match store.dataset(&state.selected_slot) {
        Some(dataset) if !dataset.is_empty() => {
            selector::build_view(&state.active_tab, dataset, config)
        }
        _ => ViewTree::placeholder(PLACEHOLDER_TEXT),
    };
    if let Some(message) = upload_notice {
        tree.prepend_notice(message);
    }

    (state, tree)
}

fn apply_upload(
    store: &mut RecordStore,
    slot: &SlotId,
    payload: UploadPayload,
) -> Result<(), DecodeError> {
    let raw = match payload {
        UploadPayload::Raw(bytes) => bytes,
        UploadPayload::EncodedContents(contents) => loader::decode_upload_contents(&contents)?,
    };
    store.set_dataset(slot, &raw)
}
