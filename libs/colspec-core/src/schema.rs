use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use colspec_types::{GenericType, to_generic};

use crate::error::ColumnError;

/// A single column: name plus the native type string the engine reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub native_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
        }
    }
}

/// Ordered column list of a dataset.
///
/// Position in `columns` is the physical column order and is what integer
/// column identifiers index into. Names are unique; construction fails
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Result<Self, ColumnError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ColumnError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Shortcut for `(name, native type)` pairs, e.g. an engine's dtypes.
    pub fn from_pairs<N, T>(pairs: impl IntoIterator<Item = (N, T)>) -> Result<Self, ColumnError>
    where
        N: Into<String>,
        T: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(n, t)| Column::new(n, t)).collect())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in physical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.names().map(str::to_string).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Name of the column at `index`. Never wraps.
    pub fn name_at(&self, index: usize) -> Result<&str, ColumnError> {
        self.columns
            .get(index)
            .map(|c| c.name.as_str())
            .ok_or(ColumnError::IndexOutOfRange {
                index,
                len: self.columns.len(),
            })
    }

    pub fn native_type(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.native_type.as_str())
    }

    /// Generic type of one column, with container element types resolved.
    pub fn column_type(&self, name: &str) -> Result<GenericType, ColumnError> {
        let native = self.native_type(name).ok_or_else(|| ColumnError::MissingColumns {
            missing: vec![name.to_string()],
            available: self.column_names(),
        })?;
        Ok(to_generic(native)?)
    }
}

impl TryFrom<Vec<Column>> for Schema {
    type Error = ColumnError;

    fn try_from(columns: Vec<Column>) -> Result<Self, Self::Error> {
        Schema::new(columns)
    }
}

impl From<Schema> for Vec<Column> {
    fn from(schema: Schema) -> Self {
        schema.columns
    }
}

/// The one capability needed from an execution-engine adapter: a snapshot
/// of the dataset schema.
pub trait SchemaProvider {
    fn schema(&self) -> Cow<'_, Schema>;
}

impl SchemaProvider for Schema {
    fn schema(&self) -> Cow<'_, Schema> {
        Cow::Borrowed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::from_pairs([("id", "bigint"), ("name", "string"), ("tags", "array<string>")])
            .unwrap()
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = Schema::from_pairs([("a", "int"), ("a", "string")]).unwrap_err();
        assert!(matches!(err, ColumnError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_name_at_bounds() {
        let schema = sample();
        assert_eq!(schema.name_at(2).unwrap(), "tags");
        assert!(matches!(
            schema.name_at(3),
            Err(ColumnError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_column_type() {
        let schema = sample();
        assert_eq!(schema.column_type("id").unwrap(), GenericType::Long);
        assert_eq!(
            schema.column_type("tags").unwrap(),
            GenericType::Array(Some(Box::new(GenericType::String)))
        );
        assert!(matches!(
            schema.column_type("nope"),
            Err(ColumnError::MissingColumns { .. })
        ));
    }

    #[test]
    fn test_deserialize_checks_uniqueness() {
        let ok: Schema = serde_json::from_str(r#"[{"name":"a","type":"int"}]"#).unwrap();
        assert_eq!(ok.column_names(), vec!["a"]);
        let dup = serde_json::from_str::<Schema>(
            r#"[{"name":"a","type":"int"},{"name":"a","type":"int"}]"#,
        );
        assert!(dup.is_err());
    }
}
