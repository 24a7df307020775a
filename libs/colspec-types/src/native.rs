/// Engine-native type categories, named after the dtype strings the
/// execution engine reports per column.
///
/// A category is coarser than a native string: every `array<...>` column
/// is [`NativeCategory::Array`] whatever its element type, and
/// `decimal(10,2)` is [`NativeCategory::Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NativeCategory {
    String,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Boolean,
    TinyInt,
    SmallInt,
    Date,
    Timestamp,
    Binary,
    Struct,
    Map,
    Null,
    Array,
}

impl NativeCategory {
    pub const ALL: [NativeCategory; 16] = [
        NativeCategory::String,
        NativeCategory::Int,
        NativeCategory::BigInt,
        NativeCategory::Float,
        NativeCategory::Double,
        NativeCategory::Decimal,
        NativeCategory::Boolean,
        NativeCategory::TinyInt,
        NativeCategory::SmallInt,
        NativeCategory::Date,
        NativeCategory::Timestamp,
        NativeCategory::Binary,
        NativeCategory::Struct,
        NativeCategory::Map,
        NativeCategory::Null,
        NativeCategory::Array,
    ];

    /// The dtype string the engine uses for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            NativeCategory::String => "string",
            NativeCategory::Int => "int",
            NativeCategory::BigInt => "bigint",
            NativeCategory::Float => "float",
            NativeCategory::Double => "double",
            NativeCategory::Decimal => "decimal",
            NativeCategory::Boolean => "boolean",
            NativeCategory::TinyInt => "tinyint",
            NativeCategory::SmallInt => "smallint",
            NativeCategory::Date => "date",
            NativeCategory::Timestamp => "timestamp",
            NativeCategory::Binary => "binary",
            NativeCategory::Struct => "struct",
            NativeCategory::Map => "map",
            NativeCategory::Null => "null",
            NativeCategory::Array => "array",
        }
    }

    /// Look up a category by the kind of a parsed native type.
    /// `kind` is expected lower-cased.
    pub fn from_kind(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == kind)
    }
}

impl std::fmt::Display for NativeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
