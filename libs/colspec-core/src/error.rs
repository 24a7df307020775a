use colspec_types::TypeError;

/// Category of a resolution error. Lets the presentation layer (CLI,
/// notebook) decide how to render without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown generic or native type name.
    Type,
    /// Requested columns absent from the schema, or an invalid schema.
    Schema,
    /// A configuration option received a value of the wrong type.
    Option,
    /// The column spec does not have a recognized shape.
    Shape,
    /// Positional column identifier out of range.
    Index,
    /// Column name pattern failed to compile.
    Pattern,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Type => f.write_str("type"),
            ErrorKind::Schema => f.write_str("schema"),
            ErrorKind::Option => f.write_str("option"),
            ErrorKind::Shape => f.write_str("shape"),
            ErrorKind::Index => f.write_str("index"),
            ErrorKind::Pattern => f.write_str("pattern"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ColumnError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("columns {missing:?} do not exist, available columns: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("option '{option}' must be a boolean, got {value}")]
    InvalidOption { option: &'static str, value: String },

    #[error("unsupported column spec: {shape}")]
    UnsupportedSpecShape { shape: String },

    #[error("column index {index} out of range for {len} columns")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid column pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate column '{0}' in schema")]
    DuplicateColumn(String),
}

impl ColumnError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ColumnError::Type(_) => ErrorKind::Type,
            ColumnError::MissingColumns { .. } | ColumnError::DuplicateColumn(_) => {
                ErrorKind::Schema
            }
            ColumnError::InvalidOption { .. } => ErrorKind::Option,
            ColumnError::UnsupportedSpecShape { .. } => ErrorKind::Shape,
            ColumnError::IndexOutOfRange { .. } => ErrorKind::Index,
            ColumnError::InvalidPattern { .. } => ErrorKind::Pattern,
        }
    }

    pub(crate) fn shape(shape: impl Into<String>) -> Self {
        ColumnError::UnsupportedSpecShape { shape: shape.into() }
    }
}
