//! Partial-update handlers: validate a submitted value, write it into the
//! record, and return the field's fragment re-rendered.
//!
//! Submitted values are not checked against a field's fixed option set.
//! The widgets only offer legal choices and the handlers trust them.

use crate::error::UpdateError;
use crate::field::{FieldName, FieldValue};
use crate::render::Fragment;
use crate::store::RecordStore;

/// Decoded form body: `(key, value)` pairs in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pairs: Vec<(String, String)>,
}

impl Submission {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Submission { pairs }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Last value submitted under `key`. A repeated key overrides the
    /// earlier values.
    pub fn last(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted under `key`, in order.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl From<Vec<(String, String)>> for Submission {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Submission::new(pairs)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Submission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Submission::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse the submitted value for `field` without touching the record.
///
/// Single-value fields need their `{field}_text` key and reject blank
/// input; the last submitted value is kept, trimmed. Lists are taken
/// verbatim. The multi-select may omit its key entirely, which clears the
/// set.
pub fn parse_value(field: FieldName, submission: &Submission) -> Result<FieldValue, UpdateError> {
    let kind = field.spec().kind;
    let key = field.input_key();
    if !kind.may_omit_key() && !submission.contains(&key) {
        return Err(UpdateError::Missing { field });
    }

    if !kind.requires_value() {
        return Ok(FieldValue::List(submission.all(&key)));
    }

    let trimmed = submission.last(&key).unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(UpdateError::Empty { field });
    }
    Ok(FieldValue::Single(trimmed.to_string()))
}

/// Validate and apply a single field update, returning the new fragment.
pub fn update_field(
    store: &RecordStore,
    record_id: u32,
    field: FieldName,
    submission: &Submission,
) -> Result<Fragment, UpdateError> {
    store.ensure_record(record_id)?;
    let value = parse_value(field, submission)?;
    store.commit(record_id, field, value)
}

/// Replace a list field with the submitted ordering, verbatim.
///
/// Any ordering is accepted, including one that drops or repeats entries.
pub fn reorder_list(
    store: &RecordStore,
    record_id: u32,
    field: FieldName,
    submission: &Submission,
) -> Result<Fragment, UpdateError> {
    store.ensure_record(record_id)?;
    if !field.is_list() {
        return Err(UpdateError::NotReorderable(field));
    }
    let ordered = submission.all(&field.input_key());
    store.commit(record_id, field, FieldValue::List(ordered))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(pairs: &[(&str, &str)]) -> Submission {
        pairs.iter().copied().collect()
    }

    #[test]
    fn single_value_is_trimmed() {
        let v = parse_value(FieldName::Name, &submit(&[("name_text", "  New  ")])).unwrap();
        assert_eq!(v, FieldValue::Single("New".into()));
    }

    #[test]
    fn missing_key_is_rejected_except_for_tags() {
        let empty = Submission::default();
        for field in FieldName::ALL {
            let result = parse_value(field, &empty);
            if field == FieldName::Tags {
                assert_eq!(result.unwrap(), FieldValue::List(vec![]));
            } else {
                assert_eq!(result.unwrap_err(), UpdateError::Missing { field });
            }
        }
    }

    #[test]
    fn whitespace_only_is_empty() {
        let err = parse_value(FieldName::Status, &submit(&[("status_text", " \t ")])).unwrap_err();
        assert_eq!(
            err,
            UpdateError::Empty {
                field: FieldName::Status
            }
        );
    }

    #[test]
    fn list_values_are_kept_untrimmed_and_in_order() {
        let s = submit(&[
            ("tags_text", " draft"),
            ("item_id", "1"),
            ("tags_text", "urgent "),
        ]);
        let v = parse_value(FieldName::Tags, &s).unwrap();
        assert_eq!(v, FieldValue::List(vec![" draft".into(), "urgent ".into()]));
    }

    #[test]
    fn last_value_wins_for_single_fields() {
        let s = submit(&[("priority_text", "Low"), ("priority_text", "High")]);
        let v = parse_value(FieldName::Priority, &s).unwrap();
        assert_eq!(v, FieldValue::Single("High".into()));
    }

    #[test]
    fn repeated_key_stores_last_value() {
        let store = RecordStore::demo();
        let fragment = update_field(
            &store,
            1,
            FieldName::Priority,
            &submit(&[("priority_text", "Low"), ("priority_text", "High")]),
        )
        .unwrap();
        assert_eq!(store.snapshot().unwrap().priority, "High");
        assert!(fragment.html().contains(r#"<option value="High" selected>"#));
    }

    #[test]
    fn blank_last_value_is_empty_even_after_a_valid_one() {
        let s = submit(&[("name_text", "Kept"), ("name_text", "  ")]);
        let err = parse_value(FieldName::Name, &s).unwrap_err();
        assert_eq!(
            err,
            UpdateError::Empty {
                field: FieldName::Name
            }
        );
    }

    #[test]
    fn reorder_rejects_single_value_fields() {
        let store = RecordStore::demo();
        let err = reorder_list(
            &store,
            1,
            FieldName::Priority,
            &submit(&[("priority_text", "Low")]),
        )
        .unwrap_err();
        assert_eq!(err, UpdateError::NotReorderable(FieldName::Priority));
    }

    #[test]
    fn unknown_record_is_not_found_before_validation() {
        let store = RecordStore::demo();
        let err = update_field(&store, 2, FieldName::Name, &Submission::default()).unwrap_err();
        assert_eq!(err, UpdateError::RecordNotFound(2));
    }
}
