use serde_json::Value;

use colspec_types::GenericType;

use crate::error::ColumnError;
use crate::resolve::{ResolveOptions, Resolved, resolve};
use crate::schema::Schema;
use crate::spec::{ColumnSpec, json_kind};

/// A resolve call assembled from loosely-typed input, e.g. a JSON object
/// coming from a notebook or an HTTP layer:
///
/// ```json
/// { "columns": ["a", 1], "return_params": false, "is_regex": false, "filter_by": ["string"] }
/// ```
///
/// Only `columns` is required. `filter_by` may be a single type name or a
/// list of names.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveRequest {
    pub spec: ColumnSpec,
    pub options: ResolveOptions,
}

impl ResolveRequest {
    pub fn new(spec: ColumnSpec, options: ResolveOptions) -> Self {
        Self { spec, options }
    }

    pub fn from_json(value: &Value) -> Result<Self, ColumnError> {
        let object = value.as_object().ok_or_else(|| {
            ColumnError::shape(format!("request must be an object, got {}", json_kind(value)))
        })?;

        let spec = object
            .get("columns")
            .ok_or_else(|| ColumnError::shape("request has no 'columns'"))
            .and_then(ColumnSpec::from_json)?;

        let options = ResolveOptions {
            return_params: flag(object.get("return_params"), "return_params")?,
            is_regex: flag(object.get("is_regex"), "is_regex")?,
            filter_by: generic_types(object.get("filter_by"))?,
        };

        Ok(Self { spec, options })
    }

    pub fn resolve(&self, schema: &Schema) -> Result<Resolved, ColumnError> {
        resolve(schema, &self.spec, &self.options)
    }
}

/// Boolean options must be real booleans; `"true"`, `1` and friends are
/// rejected.
fn flag(value: Option<&Value>, option: &'static str) -> Result<bool, ColumnError> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ColumnError::InvalidOption {
            option,
            value: other.to_string(),
        }),
    }
}

fn generic_types(value: Option<&Value>) -> Result<Vec<GenericType>, ColumnError> {
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(name)) => return Ok(vec![GenericType::from_name(name)?]),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ColumnError::shape(format!(
                "filter_by must be a type name or a list of names, got {}",
                json_kind(other)
            )));
        }
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(name) => Ok(GenericType::from_name(name)?),
            other => Err(ColumnError::shape(format!("type name must be a string, got {other}"))),
        })
        .collect()
}
