//! autosave-core: the editable record, its field widgets, and the
//! partial-update contract.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`Record`] -- the single editable record and its fixed option sets
//! - [`FieldName`], [`FieldSpec`], [`WidgetKind`], [`FieldValue`] -- field metadata
//! - [`render_fragment()`] / [`render_page()`] -- HTML rendering
//! - [`RecordStore`] -- owned, injectable holder of the record
//! - [`update_field()`] / [`reorder_list()`] -- the update handlers
//! - [`UpdateError`] -- the error type of the update handlers

pub mod error;
pub mod field;
pub mod page;
pub mod record;
pub mod render;
pub mod store;
pub mod update;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::{RenderError, UpdateError};
pub use field::{FieldName, FieldSpec, FieldValue, WidgetKind};
pub use record::{Record, CATEGORY_OPTIONS, PRIORITY_OPTIONS, TAG_OPTIONS};
pub use render::{Fragment, UpdateBinding, Verb};
pub use store::RecordStore;
pub use update::Submission;

// ── Convenience re-exports: entry points ─────────────────────────────

pub use page::render_page;
pub use render::{fragment_id, render_fragment};
pub use update::{reorder_list, update_field};
