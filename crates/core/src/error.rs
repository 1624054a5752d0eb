use crate::field::{FieldName, WidgetKind};

/// Errors returned by the field update handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// A single-value field was submitted without its value key.
    #[error("Missing field value")]
    Missing { field: FieldName },

    /// A text or choice field was submitted blank.
    #[error("Empty value not allowed")]
    Empty { field: FieldName },

    /// The path named a field the record does not have.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The path named a record other than the one being edited.
    #[error("item {0} not found")]
    RecordNotFound(u32),

    /// Reorder was requested on a field that is not a list.
    #[error("field '{0}' cannot be reordered")]
    NotReorderable(FieldName),

    /// Any unexpected fault. The record is left untouched.
    #[error("internal error: {0}")]
    Internal(String),
}

impl UpdateError {
    /// Whether the fault lies with the submitted request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, UpdateError::Internal(_))
    }
}

/// A value could not be rendered by the widget bound to its field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("field '{field}' expects a {expected} value for a {kind:?} widget")]
    ShapeMismatch {
        field: FieldName,
        kind: WidgetKind,
        expected: &'static str,
    },
}

impl From<RenderError> for UpdateError {
    fn from(e: RenderError) -> Self {
        UpdateError::Internal(e.to_string())
    }
}
