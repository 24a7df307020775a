use serde_json::Value;

use colspec_core::{ColumnSpec, GenericType, ResolveOptions, ResolveRequest, resolve};

use crate::config::{RequestArgs, ResolveArgs, SchemaFile};
use crate::error::CliError;

pub fn run(args: ResolveArgs) -> Result<(), CliError> {
    let schema = SchemaFile::load(&args.schema.schema)?;
    tracing::info!(schema = %args.schema.schema, columns = schema.len(), "loaded schema");

    let spec = ColumnSpec::from_json(&spec_value(&args.spec))?;
    let filter_by = args
        .filter
        .iter()
        .map(|name| GenericType::from_name(name))
        .collect::<Result<Vec<_>, _>>()?;
    let options = ResolveOptions {
        return_params: args.params,
        is_regex: args.regex,
        filter_by,
    };

    let resolved = resolve(&schema, &spec, &options)?;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

pub fn run_request(args: RequestArgs) -> Result<(), CliError> {
    let schema = SchemaFile::load(&args.schema.schema)?;
    tracing::info!(schema = %args.schema.schema, columns = schema.len(), "loaded schema");

    let value: Value = serde_json::from_str(&args.request)?;
    let request = ResolveRequest::from_json(&value)?;
    let resolved = request.resolve(&schema)?;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

/// Parse the spec argument as JSON; anything that is not valid JSON is
/// taken as a bare column name, so `colspec resolve price` works unquoted.
fn spec_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
