use crate::field::{FieldName, FieldValue};

pub const PRIORITY_OPTIONS: &[&str] = &["Low", "Medium", "High"];
pub const TAG_OPTIONS: &[&str] = &["important", "test", "draft", "urgent", "review"];
pub const CATEGORY_OPTIONS: &[&str] = &["development", "design", "marketing", "research"];

/// The single editable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub tags: Vec<String>,
    pub category: String,
    pub steps: Vec<String>,
}

impl Record {
    /// The record every process starts with.
    pub fn demo() -> Self {
        Record {
            id: 1,
            name: "Test Item".to_string(),
            description: "This is a test description".to_string(),
            status: "Active".to_string(),
            priority: "Medium".to_string(),
            tags: vec!["important".to_string(), "test".to_string()],
            category: "development".to_string(),
            steps: vec![
                "Step 1".to_string(),
                "Step 2".to_string(),
                "Step 3".to_string(),
            ],
        }
    }

    pub fn value(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::Name => FieldValue::Single(self.name.clone()),
            FieldName::Description => FieldValue::Single(self.description.clone()),
            FieldName::Status => FieldValue::Single(self.status.clone()),
            FieldName::Priority => FieldValue::Single(self.priority.clone()),
            FieldName::Tags => FieldValue::List(self.tags.clone()),
            FieldName::Category => FieldValue::Single(self.category.clone()),
            FieldName::Steps => FieldValue::List(self.steps.clone()),
        }
    }

    /// Overwrite one field. Returns the value back when its shape does not
    /// match the field.
    pub fn set(&mut self, field: FieldName, value: FieldValue) -> Result<(), FieldValue> {
        match (field, value) {
            (FieldName::Name, FieldValue::Single(v)) => self.name = v,
            (FieldName::Description, FieldValue::Single(v)) => self.description = v,
            (FieldName::Status, FieldValue::Single(v)) => self.status = v,
            (FieldName::Priority, FieldValue::Single(v)) => self.priority = v,
            (FieldName::Category, FieldValue::Single(v)) => self.category = v,
            (FieldName::Tags, FieldValue::List(v)) => self.tags = v,
            (FieldName::Steps, FieldValue::List(v)) => self.steps = v,
            (_, other) => return Err(other),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_record_satisfies_option_invariants() {
        let r = Record::demo();
        assert!(PRIORITY_OPTIONS.contains(&r.priority.as_str()));
        assert!(CATEGORY_OPTIONS.contains(&r.category.as_str()));
        assert!(r.tags.iter().all(|t| TAG_OPTIONS.contains(&t.as_str())));
    }

    #[test]
    fn set_then_value_returns_new_value() {
        let mut r = Record::demo();
        r.set(FieldName::Status, FieldValue::Single("Done".into()))
            .unwrap();
        assert_eq!(r.value(FieldName::Status), FieldValue::Single("Done".into()));

        r.set(FieldName::Tags, FieldValue::List(vec![])).unwrap();
        assert!(r.tags.is_empty());
    }

    #[test]
    fn set_rejects_mismatched_shape() {
        let mut r = Record::demo();
        let rejected = r
            .set(FieldName::Name, FieldValue::List(vec!["x".into()]))
            .unwrap_err();
        assert_eq!(rejected, FieldValue::List(vec!["x".into()]));
        assert_eq!(r, Record::demo());
    }
}
