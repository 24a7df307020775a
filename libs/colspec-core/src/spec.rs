use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ColumnError;
use crate::schema::Schema;

/// A column reference: by name, or by position in the schema's physical
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnId {
    ByIndex(usize),
    ByName(String),
}

impl ColumnId {
    /// Column name this identifier denotes. Names pass through unchecked;
    /// existence is validated separately so every missing name is reported
    /// at once.
    pub fn resolve(&self, schema: &Schema) -> Result<String, ColumnError> {
        match self {
            ColumnId::ByName(name) => Ok(name.clone()),
            ColumnId::ByIndex(index) => schema.name_at(*index).map(str::to_string),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(ColumnId::ByName(s.clone())),
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(ColumnId::ByIndex),
            _ => None,
        }
    }
}

impl From<&str> for ColumnId {
    fn from(name: &str) -> Self {
        ColumnId::ByName(name.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(name: String) -> Self {
        ColumnId::ByName(name)
    }
}

impl From<usize> for ColumnId {
    fn from(index: usize) -> Self {
        ColumnId::ByIndex(index)
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnId::ByName(name) => write!(f, "'{name}'"),
            ColumnId::ByIndex(index) => write!(f, "#{index}"),
        }
    }
}

/// A column plus opaque parameters for a downstream per-column function,
/// e.g. `("price", "decimal", 2)` for a cast.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnParams {
    pub column: ColumnId,
    pub params: Vec<Value>,
}

impl ColumnParams {
    pub fn new(column: impl Into<ColumnId>, params: Vec<Value>) -> Self {
        Self {
            column: column.into(),
            params,
        }
    }
}

/// Column specification, one of the accepted caller shapes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ColumnSpec {
    /// `"*"`: every column, in schema order.
    All,
    NameList(Vec<ColumnId>),
    ParamList(Vec<ColumnParams>),
    /// Pattern matched against column names, anchored at the start.
    Regex(String),
    Scalar(ColumnId),
}

impl ColumnSpec {
    pub fn names<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnId>,
    {
        ColumnSpec::NameList(ids.into_iter().map(Into::into).collect())
    }

    pub fn single(id: impl Into<ColumnId>) -> Self {
        ColumnSpec::Scalar(id.into())
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        ColumnSpec::Regex(pattern.into())
    }

    /// Infer the spec shape from loosely-typed input:
    ///
    /// - `"*"` → [`ColumnSpec::All`]
    /// - a string or non-negative integer → [`ColumnSpec::Scalar`]
    /// - a list of strings/integers → [`ColumnSpec::NameList`]
    /// - a list of lists (tuples), first element the column → [`ColumnSpec::ParamList`]
    ///
    /// Anything else is [`ColumnError::UnsupportedSpecShape`].
    pub fn from_json(value: &Value) -> Result<Self, ColumnError> {
        match value {
            Value::String(s) if s == "*" => Ok(ColumnSpec::All),
            Value::String(_) | Value::Number(_) => ColumnId::from_json(value)
                .map(ColumnSpec::Scalar)
                .ok_or_else(|| {
                    ColumnError::shape(format!("column index {value} is not a valid index"))
                }),
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_array) => items
                .iter()
                .map(params_from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(ColumnSpec::ParamList),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    ColumnId::from_json(item).ok_or_else(|| {
                        ColumnError::shape(format!("list element {item} is not a column id"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ColumnSpec::NameList),
            other => Err(ColumnError::shape(format!(
                "expected a string, integer or list, got {}",
                json_kind(other)
            ))),
        }
    }
}

impl TryFrom<Value> for ColumnSpec {
    type Error = ColumnError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ColumnSpec::from_json(&value)
    }
}

impl From<ColumnId> for ColumnSpec {
    fn from(id: ColumnId) -> Self {
        ColumnSpec::Scalar(id)
    }
}

impl From<Vec<ColumnParams>> for ColumnSpec {
    fn from(params: Vec<ColumnParams>) -> Self {
        ColumnSpec::ParamList(params)
    }
}

fn params_from_json(value: &Value) -> Result<ColumnParams, ColumnError> {
    let tuple = value.as_array().map(Vec::as_slice).unwrap_or_default();
    let (head, tail) = tuple
        .split_first()
        .ok_or_else(|| ColumnError::shape("empty tuple in parameter list"))?;
    let column = ColumnId::from_json(head).ok_or_else(|| {
        ColumnError::shape(format!("tuple head {head} is not a column name or index"))
    })?;
    Ok(ColumnParams {
        column,
        params: tail.to_vec(),
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_star() {
        assert_eq!(ColumnSpec::from_json(&json!("*")).unwrap(), ColumnSpec::All);
    }

    #[test]
    fn test_from_json_scalar() {
        assert_eq!(
            ColumnSpec::from_json(&json!("price")).unwrap(),
            ColumnSpec::single("price")
        );
        assert_eq!(ColumnSpec::from_json(&json!(2)).unwrap(), ColumnSpec::single(2usize));
        assert!(matches!(
            ColumnSpec::from_json(&json!(-1)),
            Err(ColumnError::UnsupportedSpecShape { .. })
        ));
        assert!(ColumnSpec::from_json(&json!(1.5)).is_err());
    }

    #[test]
    fn test_from_json_name_list_mixed_ids() {
        let spec = ColumnSpec::from_json(&json!(["a", 1, "c"])).unwrap();
        assert_eq!(
            spec,
            ColumnSpec::NameList(vec!["a".into(), 1usize.into(), "c".into()])
        );
        assert_eq!(ColumnSpec::from_json(&json!([])).unwrap(), ColumnSpec::NameList(vec![]));
    }

    #[test]
    fn test_from_json_param_list() {
        let spec = ColumnSpec::from_json(&json!([["a", 1, 2], ["b"], [0, "x"]])).unwrap();
        assert_eq!(
            spec,
            ColumnSpec::ParamList(vec![
                ColumnParams::new("a", vec![json!(1), json!(2)]),
                ColumnParams::new("b", vec![]),
                ColumnParams::new(0usize, vec![json!("x")]),
            ])
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_shapes() {
        for bad in [json!(null), json!(true), json!({"a": 1}), json!([["a"], "b"]), json!([[]])] {
            let err = ColumnSpec::from_json(&bad).unwrap_err();
            assert!(matches!(err, ColumnError::UnsupportedSpecShape { .. }), "{bad}");
        }
    }

    #[test]
    fn test_deserialize_via_json() {
        let spec: ColumnSpec = serde_json::from_str(r#"["x", "y"]"#).unwrap();
        assert_eq!(spec, ColumnSpec::names(["x", "y"]));
    }
}
