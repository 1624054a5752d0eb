//! Application state.

use autosave_core::RecordStore;

/// Application state shared across request handlers.
pub(crate) struct AppState {
    /// The record being edited.
    pub(crate) store: RecordStore,
}

impl AppState {
    pub(crate) fn new(store: RecordStore) -> Self {
        AppState { store }
    }
}
