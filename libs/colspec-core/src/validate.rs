use std::collections::BTreeSet;

use crate::error::ColumnError;
use crate::resolve::dispatch;
use crate::schema::Schema;
use crate::spec::{ColumnId, ColumnSpec};

/// Check that every requested name exists in `schema`.
///
/// On failure the error carries the complete sorted set of missing names
/// and every available name, never just the first offender.
pub fn validate_exist<S: AsRef<str>>(schema: &Schema, requested: &[S]) -> Result<(), ColumnError> {
    let missing: BTreeSet<&str> = requested
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !schema.contains(name))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(ColumnError::MissingColumns {
        missing: missing.into_iter().map(str::to_string).collect(),
        available: schema.column_names(),
    })
}

/// Extract the requested names from `spec` and check they exist.
///
/// For a parameter list, `position` selects which tuple element holds the
/// column (0 is the head). The returned set is de-duplicated and only
/// meant for existence checks; it does not keep the spec's order.
pub fn validate_spec_shape(
    schema: &Schema,
    spec: &ColumnSpec,
    position: usize,
) -> Result<BTreeSet<String>, ColumnError> {
    let names: Vec<String> = match spec {
        ColumnSpec::ParamList(tuples) if position > 0 => tuples
            .iter()
            .map(|tuple| {
                let element = tuple.params.get(position - 1).ok_or_else(|| {
                    let column = &tuple.column;
                    ColumnError::shape(format!("tuple for {column} has no element at {position}"))
                })?;
                let id: ColumnId = serde_json::from_value(element.clone()).map_err(|_| {
                    ColumnError::shape(format!("tuple element {element} is not a column id"))
                })?;
                id.resolve(schema)
            })
            .collect::<Result<_, _>>()?,
        other => dispatch(schema, other, false)?.0,
    };

    validate_exist(schema, &names)?;
    Ok(names.into_iter().collect())
}
