use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use colspec_types::{GenericType, NativeCategory, category_of};

use crate::error::ColumnError;
use crate::schema::{Schema, SchemaProvider};
use crate::spec::{ColumnId, ColumnSpec};
use crate::validate::validate_exist;

/// Resolution options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Return the per-column parameters together with the names.
    pub return_params: bool,
    /// Treat a scalar string spec as a column name pattern.
    pub is_regex: bool,
    /// Keep only columns matching at least one of these types.
    /// Empty means no filtering.
    pub filter_by: Vec<GenericType>,
}

impl ResolveOptions {
    pub fn with_params(mut self) -> Self {
        self.return_params = true;
        self
    }

    pub fn regex(mut self) -> Self {
        self.is_regex = true;
        self
    }

    pub fn filter_by(mut self, types: impl IntoIterator<Item = GenericType>) -> Self {
        self.filter_by.extend(types);
        self
    }
}

/// Resolved columns, optionally with the parameters attached by a
/// parameter-list spec.
///
/// `params` is index-aligned with `names`; shapes without parameters get
/// an empty list per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    Names(Vec<String>),
    WithParams {
        names: Vec<String>,
        params: Vec<Vec<Value>>,
    },
}

impl Resolved {
    pub fn names(&self) -> &[String] {
        match self {
            Resolved::Names(names) | Resolved::WithParams { names, .. } => names,
        }
    }

    pub fn params(&self) -> Option<&[Vec<Value>]> {
        match self {
            Resolved::Names(_) => None,
            Resolved::WithParams { params, .. } => Some(params),
        }
    }

    pub fn into_names(self) -> Vec<String> {
        match self {
            Resolved::Names(names) | Resolved::WithParams { names, .. } => names,
        }
    }
}

/// Resolve `spec` against `schema` into a validated, ordered column list.
///
/// 1. Expand the spec shape into names (and parameters).
/// 2. Fail with [`ColumnError::MissingColumns`] if any name is absent.
/// 3. If `options.filter_by` is non-empty, keep only the columns whose
///    native type falls in one of the requested categories. Order and
///    parameter alignment are preserved.
pub fn resolve(
    schema: &Schema,
    spec: &ColumnSpec,
    options: &ResolveOptions,
) -> Result<Resolved, ColumnError> {
    tracing::debug!(?spec, ?options, "resolving column spec");

    let (mut names, mut params) = dispatch(schema, spec, options.is_regex)?;
    validate_exist(schema, &names)?;

    if !options.filter_by.is_empty() {
        let allowed: HashSet<&str> = options
            .filter_by
            .iter()
            .flat_map(|generic| names_by_native_category(schema, generic.native_category()))
            .collect();

        let mut kept_params = Vec::with_capacity(names.len());
        let mut kept_names = Vec::with_capacity(names.len());
        for (name, param) in names.into_iter().zip(params) {
            if allowed.contains(name.as_str()) {
                kept_names.push(name);
                kept_params.push(param);
            }
        }
        names = kept_names;
        params = kept_params;
    }

    tracing::debug!(columns = names.len(), "resolved column spec");

    if options.return_params {
        Ok(Resolved::WithParams { names, params })
    } else {
        Ok(Resolved::Names(names))
    }
}

/// [`resolve`] against the schema of an engine adapter.
pub fn resolve_from(
    provider: &impl SchemaProvider,
    spec: &ColumnSpec,
    options: &ResolveOptions,
) -> Result<Resolved, ColumnError> {
    resolve(&provider.schema(), spec, options)
}

/// Names of schema columns whose native type belongs to `category`, in
/// schema order.
///
/// Every native string starting with `array` matches
/// [`NativeCategory::Array`], whatever its element type and even if the
/// element cannot be parsed. Any other column matches when its lower-cased
/// kind is `category` (`decimal(10,2)` is `decimal`). Columns outside the
/// vocabulary never match and are reported as a warning.
pub fn names_by_native_category(schema: &Schema, category: NativeCategory) -> Vec<&str> {
    schema
        .columns()
        .iter()
        .filter(|column| match category_of(&column.native_type) {
            Ok(found) => found == category,
            Err(e) => {
                tracing::warn!(
                    column = %column.name,
                    native_type = %column.native_type,
                    error = %e,
                    "cannot classify column type"
                );
                false
            }
        })
        .map(|column| column.name.as_str())
        .collect()
}

/// Expand a spec into column names plus one parameter list per name.
pub(crate) fn dispatch(
    schema: &Schema,
    spec: &ColumnSpec,
    is_regex: bool,
) -> Result<(Vec<String>, Vec<Vec<Value>>), ColumnError> {
    let names = match spec {
        ColumnSpec::All => schema.column_names(),
        ColumnSpec::ParamList(tuples) => {
            let names = tuples
                .iter()
                .map(|t| t.column.resolve(schema))
                .collect::<Result<Vec<_>, _>>()?;
            let params = tuples.iter().map(|t| t.params.clone()).collect();
            return Ok((names, params));
        }
        ColumnSpec::NameList(ids) => ids
            .iter()
            .map(|id| id.resolve(schema))
            .collect::<Result<_, _>>()?,
        ColumnSpec::Regex(pattern) => matching(schema, pattern)?,
        ColumnSpec::Scalar(ColumnId::ByName(name)) if name == "*" => schema.column_names(),
        ColumnSpec::Scalar(ColumnId::ByName(pattern)) if is_regex => matching(schema, pattern)?,
        ColumnSpec::Scalar(id @ ColumnId::ByIndex(_)) if is_regex => {
            let reason = format!("column pattern must be a string, got index {id}");
            return Err(ColumnError::shape(reason));
        }
        ColumnSpec::Scalar(id) => vec![id.resolve(schema)?],
    };

    let params = vec![Vec::new(); names.len()];
    Ok((names, params))
}

/// Names that `pattern` matches from their first character. A match of a
/// prefix is enough: `id` selects both `id` and `id_2`.
///
/// The pattern is compiled as given and the match position checked, so no
/// pattern text can get around the anchor. The leftmost match starts at 0
/// whenever any match does.
fn matching(schema: &Schema, pattern: &str) -> Result<Vec<String>, ColumnError> {
    let re = Regex::new(pattern).map_err(|source| ColumnError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(schema
        .names()
        .filter(|name| re.find(name).is_some_and(|m| m.start() == 0))
        .map(str::to_string)
        .collect())
}
