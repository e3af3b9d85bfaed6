//! Ordered column-field resolution for backend task documents.
//!
//! The backend reports a task's column under whichever field its endpoint
//! happens to use. A [`ColumnResolver`] walks an explicit priority list of
//! `(field name, parser)` pairs and returns the first field that parses to a
//! known [`Column`].

use crate::board::{domain::Column, ports::RemoteTask};
use serde_json::Value;

/// Converts a raw field value into a column, or `None` if unrecognised.
pub type ColumnParser = fn(&Value) -> Option<Column>;

/// One entry of the resolution priority list.
#[derive(Debug, Clone)]
pub struct ColumnField {
    name: String,
    parser: ColumnParser,
}

impl ColumnField {
    /// Creates a field entry.
    #[must_use]
    pub fn new(name: impl Into<String>, parser: ColumnParser) -> Self {
        Self {
            name: name.into(),
            parser,
        }
    }

    /// Returns the field name looked up in the document.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, task: &RemoteTask) -> Option<Column> {
        task.field(&self.name).and_then(self.parser)
    }
}

/// Column resolved from a backend document, with the field that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Normalized column.
    pub column: Column,
    /// Name of the winning field.
    pub field: String,
}

/// Priority-ordered list of column fields.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sprintboard::board::{
///     domain::Column,
///     ports::RemoteTask,
///     services::ColumnResolver,
/// };
///
/// let document = RemoteTask::from_value(json!({"column": "Review", "status": "done"}))?;
/// let resolved = ColumnResolver::default().resolve(&document);
/// assert_eq!(resolved.map(|r| r.column), Some(Column::Review));
/// # Ok::<(), sprintboard::board::ports::RemoteTaskError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    fields: Vec<ColumnField>,
}

impl ColumnResolver {
    /// Field names consulted by the default resolver, highest priority first.
    pub const DEFAULT_FIELDS: [&'static str; 4] =
        ["column", "status", "kanbanStatus", "kanban_status"];

    /// Creates a resolver from an explicit priority list.
    #[must_use]
    pub fn new(fields: impl IntoIterator<Item = ColumnField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Appends a field with the lowest priority so far.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, parser: ColumnParser) -> Self {
        self.fields.push(ColumnField::new(name, parser));
        self
    }

    /// Returns the field names in priority order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(ColumnField::name)
    }

    /// Returns the first field that parses to a known column.
    ///
    /// A field that is present but unrecognised does not stop the search.
    #[must_use]
    pub fn resolve(&self, task: &RemoteTask) -> Option<ResolvedColumn> {
        self.fields.iter().find_map(|field| {
            field.parse(task).map(|column| ResolvedColumn {
                column,
                field: field.name.clone(),
            })
        })
    }
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_FIELDS
                .into_iter()
                .map(|name| ColumnField::new(name, parse_column_value)),
        )
    }
}

/// Parses a string spelling of a column.
#[must_use]
pub fn parse_column_text(value: &Value) -> Option<Column> {
    value.as_str().and_then(Column::from_alias)
}

/// Parses an object of the form `{"key": ..}` or `{"name": ..}`.
#[must_use]
pub fn parse_column_object(value: &Value) -> Option<Column> {
    let object = value.as_object()?;
    ["key", "name", "value"]
        .into_iter()
        .filter_map(|key| object.get(key))
        .find_map(parse_column_text)
}

/// Parses either a string or an object spelling.
#[must_use]
pub fn parse_column_value(value: &Value) -> Option<Column> {
    parse_column_text(value).or_else(|| parse_column_object(value))
}
