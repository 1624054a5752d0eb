//! Field names, widget kinds, and the static metadata bound to each field.

use std::fmt;
use std::str::FromStr;

use crate::error::UpdateError;
use crate::record::{CATEGORY_OPTIONS, PRIORITY_OPTIONS, TAG_OPTIONS};

/// The closed set of editable fields on a [`Record`](crate::Record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Name,
    Description,
    Status,
    Priority,
    Tags,
    Category,
    Steps,
}

impl FieldName {
    /// Every field, in page order.
    pub const ALL: [FieldName; 7] = [
        FieldName::Name,
        FieldName::Description,
        FieldName::Status,
        FieldName::Priority,
        FieldName::Tags,
        FieldName::Category,
        FieldName::Steps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Description => "description",
            FieldName::Status => "status",
            FieldName::Priority => "priority",
            FieldName::Tags => "tags",
            FieldName::Category => "category",
            FieldName::Steps => "steps",
        }
    }

    /// Form key the field's value(s) are submitted under.
    pub fn input_key(self) -> String {
        format!("{}_text", self.as_str())
    }

    /// Static rendering metadata for this field.
    pub fn spec(self) -> FieldSpec {
        match self {
            FieldName::Name => FieldSpec::new(self, "Item Name", WidgetKind::Text, &[]),
            FieldName::Description => {
                FieldSpec::new(self, "Description", WidgetKind::Textarea, &[])
            }
            FieldName::Status => FieldSpec::new(self, "Status", WidgetKind::Text, &[]),
            FieldName::Priority => {
                FieldSpec::new(self, "Priority", WidgetKind::Dropdown, PRIORITY_OPTIONS)
            }
            FieldName::Tags => FieldSpec::new(self, "Tags", WidgetKind::Multiselect, TAG_OPTIONS),
            FieldName::Category => {
                FieldSpec::new(self, "Category", WidgetKind::Radio, CATEGORY_OPTIONS)
            }
            FieldName::Steps => FieldSpec::new(self, "Steps", WidgetKind::SortableList, &[]),
        }
    }

    /// Whether the field holds an ordered list rather than a single string.
    pub fn is_list(self) -> bool {
        self.spec().kind.is_list()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = UpdateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UpdateError::UnknownField(s.to_string()))
    }
}

/// The editing control bound to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Text,
    Textarea,
    Dropdown,
    Multiselect,
    Radio,
    SortableList,
}

impl WidgetKind {
    pub fn is_list(self) -> bool {
        matches!(self, WidgetKind::Multiselect | WidgetKind::SortableList)
    }

    /// Text and single-choice widgets reject blank submissions.
    pub fn requires_value(self) -> bool {
        !self.is_list()
    }

    /// An unchecked checkbox group submits nothing, so its key may be absent.
    pub fn may_omit_key(self) -> bool {
        self == WidgetKind::Multiselect
    }
}

/// Label, widget kind and fixed option set for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: WidgetKind,
    /// Empty for free-form widgets.
    pub options: &'static [&'static str],
}

impl FieldSpec {
    const fn new(
        name: FieldName,
        label: &'static str,
        kind: WidgetKind,
        options: &'static [&'static str],
    ) -> Self {
        FieldSpec {
            name,
            label,
            kind,
            options,
        }
    }
}

/// A field's current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldValue::Single(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Single(_) => None,
            FieldValue::List(v) => Some(v),
        }
    }
}
