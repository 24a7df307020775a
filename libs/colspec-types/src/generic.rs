use crate::error::TypeError;
use crate::expr::TypeExpr;
use crate::native::NativeCategory;

/// Portable type vocabulary exposed to callers, independent of the engine.
///
/// Every variant maps to exactly one [`NativeCategory`]. `Array` carries its
/// element type when it is known; a bare `array` request (or a native
/// `array` without element) has `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenericType {
    String,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Boolean,
    Byte,
    Short,
    Date,
    Timestamp,
    Binary,
    Struct,
    Map,
    Null,
    Array(Option<Box<GenericType>>),
}

/// Accepted generic names, aliases included. Matched case-insensitively.
const NAMES: &[&str] = &[
    "string", "str", "integer", "int", "long", "bigint", "float", "double", "decimal",
    "boolean", "bool", "byte", "short", "date", "timestamp", "binary", "struct", "map",
    "null", "array",
];

fn base(name: &str) -> Option<GenericType> {
    let ty = match name {
        "string" | "str" => GenericType::String,
        "integer" | "int" => GenericType::Integer,
        "long" | "bigint" => GenericType::Long,
        "float" => GenericType::Float,
        "double" => GenericType::Double,
        "decimal" => GenericType::Decimal,
        "boolean" | "bool" => GenericType::Boolean,
        "byte" => GenericType::Byte,
        "short" => GenericType::Short,
        "date" => GenericType::Date,
        "timestamp" => GenericType::Timestamp,
        "binary" => GenericType::Binary,
        "struct" => GenericType::Struct,
        "map" => GenericType::Map,
        "null" => GenericType::Null,
        "array" => GenericType::Array(None),
        _ => return None,
    };
    Some(ty)
}

impl GenericType {
    /// All accepted generic names, for diagnostics.
    pub fn names() -> Vec<&'static str> {
        NAMES.to_vec()
    }

    /// Resolve a generic name such as `"Integer"`, `"str"` or
    /// `"array<string>"`.
    pub fn from_name(name: &str) -> Result<Self, TypeError> {
        let lowered = name.trim().to_ascii_lowercase();
        let expr = TypeExpr::parse(&lowered).map_err(|_| unknown(name))?;
        Self::from_expr(&expr).ok_or_else(|| unknown(name))
    }

    fn from_expr(expr: &TypeExpr) -> Option<Self> {
        match base(&expr.kind)? {
            GenericType::Array(_) => match expr.fields.as_slice() {
                [] => Some(GenericType::Array(None)),
                [element] if element.name.is_none() => {
                    let inner = Self::from_expr(&element.ty)?;
                    Some(GenericType::Array(Some(Box::new(inner))))
                }
                _ => None,
            },
            scalar if expr.fields.is_empty() => Some(scalar),
            _ => None,
        }
    }

    /// The native category this generic type maps to.
    pub fn native_category(&self) -> NativeCategory {
        match self {
            GenericType::String => NativeCategory::String,
            GenericType::Integer => NativeCategory::Int,
            GenericType::Long => NativeCategory::BigInt,
            GenericType::Float => NativeCategory::Float,
            GenericType::Double => NativeCategory::Double,
            GenericType::Decimal => NativeCategory::Decimal,
            GenericType::Boolean => NativeCategory::Boolean,
            GenericType::Byte => NativeCategory::TinyInt,
            GenericType::Short => NativeCategory::SmallInt,
            GenericType::Date => NativeCategory::Date,
            GenericType::Timestamp => NativeCategory::Timestamp,
            GenericType::Binary => NativeCategory::Binary,
            GenericType::Struct => NativeCategory::Struct,
            GenericType::Map => NativeCategory::Map,
            GenericType::Null => NativeCategory::Null,
            GenericType::Array(_) => NativeCategory::Array,
        }
    }

    /// Equality at the category level: `array<int>` and `array` agree.
    pub fn same_category(&self, other: &GenericType) -> bool {
        self.native_category() == other.native_category()
    }
}

fn unknown(name: &str) -> TypeError {
    TypeError::UnknownGenericType {
        name: name.to_string(),
        expected: GenericType::names(),
    }
}

impl std::str::FromStr for GenericType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for GenericType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericType::String => write!(f, "string"),
            GenericType::Integer => write!(f, "integer"),
            GenericType::Long => write!(f, "long"),
            GenericType::Float => write!(f, "float"),
            GenericType::Double => write!(f, "double"),
            GenericType::Decimal => write!(f, "decimal"),
            GenericType::Boolean => write!(f, "boolean"),
            GenericType::Byte => write!(f, "byte"),
            GenericType::Short => write!(f, "short"),
            GenericType::Date => write!(f, "date"),
            GenericType::Timestamp => write!(f, "timestamp"),
            GenericType::Binary => write!(f, "binary"),
            GenericType::Struct => write!(f, "struct"),
            GenericType::Map => write!(f, "map"),
            GenericType::Null => write!(f, "null"),
            GenericType::Array(None) => write!(f, "array"),
            GenericType::Array(Some(inner)) => write!(f, "array<{inner}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(GenericType::from_name("Integer").unwrap(), GenericType::Integer);
        assert_eq!(GenericType::from_name("STR").unwrap(), GenericType::String);
        assert_eq!(GenericType::from_name(" bool ").unwrap(), GenericType::Boolean);
    }

    #[test]
    fn test_from_name_array() {
        assert_eq!(GenericType::from_name("array").unwrap(), GenericType::Array(None));
        let nested: GenericType = "array<array<int>>".parse().unwrap();
        assert_eq!(nested.to_string(), "array<array<integer>>");
        let integer = Some(Box::new(GenericType::Integer));
        assert_eq!(nested, GenericType::Array(Some(Box::new(GenericType::Array(integer)))));
    }

    #[test]
    fn test_from_name_unknown() {
        let err = GenericType::from_name("varchar").unwrap_err();
        match err {
            TypeError::UnknownGenericType { name, expected } => {
                assert_eq!(name, "varchar");
                assert!(expected.contains(&"string"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(GenericType::from_name("int<string>").is_err());
        assert!(GenericType::from_name("").is_err());
    }

    #[test]
    fn test_same_category_ignores_element() {
        let typed = GenericType::Array(Some(Box::new(GenericType::String)));
        assert!(typed.same_category(&GenericType::Array(None)));
        assert!(!typed.same_category(&GenericType::String));
    }
}
