//! Owned store for the single editable record.

use std::sync::{PoisonError, RwLock};

use crate::error::UpdateError;
use crate::field::{FieldName, FieldValue};
use crate::page;
use crate::record::Record;
use crate::render::{render_fragment, Fragment};

/// Holds the record being edited. Handlers receive it by injection, so
/// each test can own a fresh one.
///
/// The lock only serialises access to the record. Two updates to the same
/// field still race, and the last one wins.
#[derive(Debug)]
pub struct RecordStore {
    record: RwLock<Record>,
}

fn poisoned<T>(_: PoisonError<T>) -> UpdateError {
    UpdateError::Internal("record lock poisoned".to_string())
}

impl RecordStore {
    pub fn new(record: Record) -> Self {
        RecordStore {
            record: RwLock::new(record),
        }
    }

    /// A store seeded with [`Record::demo`].
    pub fn demo() -> Self {
        RecordStore::new(Record::demo())
    }

    /// A copy of the record as it stands now.
    pub fn snapshot(&self) -> Result<Record, UpdateError> {
        Ok(self.record.read().map_err(poisoned)?.clone())
    }

    /// Fail with [`UpdateError::RecordNotFound`] unless `record_id` is the
    /// record held by this store.
    pub fn ensure_record(&self, record_id: u32) -> Result<(), UpdateError> {
        let record = self.record.read().map_err(poisoned)?;
        if record.id == record_id {
            Ok(())
        } else {
            Err(UpdateError::RecordNotFound(record_id))
        }
    }

    /// Render the current value of one field.
    pub fn render_field(&self, record_id: u32, field: FieldName) -> Result<Fragment, UpdateError> {
        let record = self.record.read().map_err(poisoned)?;
        if record.id != record_id {
            return Err(UpdateError::RecordNotFound(record_id));
        }
        Ok(render_fragment(
            record.id,
            &field.spec(),
            &record.value(field),
        )?)
    }

    /// Render the full editing page.
    pub fn render_page(&self) -> Result<String, UpdateError> {
        let record = self.record.read().map_err(poisoned)?;
        Ok(page::render_page(&record)?)
    }

    /// Render `value` as the field's new fragment and, only once that has
    /// succeeded, write it into the record.
    pub(crate) fn commit(
        &self,
        record_id: u32,
        field: FieldName,
        value: FieldValue,
    ) -> Result<Fragment, UpdateError> {
        let mut record = self.record.write().map_err(poisoned)?;
        if record.id != record_id {
            return Err(UpdateError::RecordNotFound(record_id));
        }
        let fragment = render_fragment(record.id, &field.spec(), &value)?;
        record.set(field, value).map_err(|rejected| {
            UpdateError::Internal(format!(
                "value {:?} does not fit field '{}'",
                rejected, field
            ))
        })?;
        Ok(fragment)
    }
}

#[cfg(any(test, feature = "test-util"))]
impl RecordStore {
    /// Poison the record lock, as a handler panicking mid-write would.
    pub fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.record.write();
            panic!("record lock poisoned on purpose");
        }));
    }

    /// The record as it stands, read through a poisoned lock.
    pub fn snapshot_ignoring_poison(&self) -> Record {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        RecordStore::demo()
    }
}
