use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use colspec_core::{Column, Schema};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "colspec", about = "Resolve column specs against a dataset schema")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a column spec given as JSON (a bare name is accepted too)
    Resolve(ResolveArgs),
    /// Resolve a full JSON request: {"columns": ..., "return_params": ..., ...}
    Request(RequestArgs),
    /// Print the generic type of a column
    Dtype(DtypeArgs),
    /// Map a generic type name to its native category
    Native(NativeArgs),
    /// Map a native type string to its generic type
    Generic(GenericArgs),
}

#[derive(Args, Clone, Debug)]
pub struct SchemaArgs {
    /// Path to the TOML schema file
    #[arg(long, default_value = "schema.toml", env = "COLSPEC_SCHEMA")]
    pub schema: String,
}

#[derive(Args, Clone, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Treat a single string spec as a column name pattern
    #[arg(long)]
    pub regex: bool,

    /// Print per-column parameters alongside the names
    #[arg(long)]
    pub params: bool,

    /// Keep only columns of this generic type (repeatable)
    #[arg(long = "filter")]
    pub filter: Vec<String>,

    /// Column spec: "*", "name", 0, ["a", 1], [["a", 1, 2]]
    pub spec: String,
}

#[derive(Args, Clone, Debug)]
pub struct RequestArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    pub request: String,
}

#[derive(Args, Clone, Debug)]
pub struct DtypeArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    pub column: String,
}

#[derive(Args, Clone, Debug)]
pub struct NativeArgs {
    pub generic: String,
}

#[derive(Args, Clone, Debug)]
pub struct GenericArgs {
    pub native: String,
}

// ---- TOML schema file ----

/// ```toml
/// [[columns]]
/// name = "id"
/// type = "bigint"
/// ```
#[derive(Debug, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl SchemaFile {
    pub fn load(path: &str) -> Result<Schema, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config { context: "read", detail: format!("'{path}': {e}") })?;
        Self::parse(&content)
            .map_err(|e| CliError::Config { context: "parse", detail: format!("'{path}': {e}") })
    }

    pub fn parse(toml_str: &str) -> Result<Schema, String> {
        let file: SchemaFile = toml::from_str(toml_str).map_err(|e| e.to_string())?;
        Schema::new(file.columns).map_err(|e| e.to_string())
    }
}
