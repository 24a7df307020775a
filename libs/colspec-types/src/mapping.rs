//! Mapping between the generic vocabulary and engine-native type strings.
//!
//! - generic → native is total over [`GenericType`] and lands on a
//!   [`NativeCategory`];
//! - native → generic works on categories, so `array<int>` and
//!   `array<string>` both come back as arrays, with the element resolved
//!   recursively through the same table.

use crate::error::TypeError;
use crate::expr::TypeExpr;
use crate::generic::GenericType;
use crate::native::NativeCategory;

/// Generic name → native category. The name match is case-insensitive.
pub fn to_native(generic: &str) -> Result<NativeCategory, TypeError> {
    GenericType::from_name(generic).map(|g| g.native_category())
}

/// Native type string → generic type. The string is lower-cased before
/// lookup; container element types are resolved recursively.
pub fn to_generic(native: &str) -> Result<GenericType, TypeError> {
    let normalized = native.trim().to_ascii_lowercase();
    let expr = TypeExpr::parse(&normalized)?;
    generic_of(&expr, &normalized)
}

/// Category of a native type string without resolving container elements.
///
/// Any string starting with `array` is [`NativeCategory::Array`] without
/// being parsed, so arrays of element types the parser or the vocabulary
/// does not know (`array<struct<first name:string>>`) still classify.
pub fn category_of(native: &str) -> Result<NativeCategory, TypeError> {
    let normalized = native.trim().to_ascii_lowercase();
    if normalized.get(..5) == Some(NativeCategory::Array.as_str()) {
        return Ok(NativeCategory::Array);
    }
    let expr = TypeExpr::parse(&normalized)?;
    NativeCategory::from_kind(&expr.kind)
        .ok_or(TypeError::UnknownNativeType { native: normalized })
}

/// Split an array type string into its category and element type.
///
/// `Ok(None)` for anything that is not an array with exactly one element
/// type, e.g. `int` or a bare `array`.
pub fn split_container(native: &str) -> Result<Option<(NativeCategory, TypeExpr)>, TypeError> {
    let normalized = native.trim().to_ascii_lowercase();
    let mut expr = TypeExpr::parse(&normalized)?;
    let is_array = NativeCategory::from_kind(&expr.kind) == Some(NativeCategory::Array);
    if !is_array || expr.fields.len() != 1 {
        return Ok(None);
    }
    let element = expr.fields.remove(0).ty;
    Ok(Some((NativeCategory::Array, element)))
}

fn generic_of(expr: &TypeExpr, native: &str) -> Result<GenericType, TypeError> {
    let category = NativeCategory::from_kind(&expr.kind)
        .ok_or_else(|| TypeError::UnknownNativeType { native: expr.to_string() })?;

    let generic = match category {
        NativeCategory::Array => match expr.fields.as_slice() {
            [] => GenericType::Array(None),
            [element] => {
                let inner = generic_of(&element.ty, native)?;
                GenericType::Array(Some(Box::new(inner)))
            }
            _ => return Err(malformed_arity(native, "array takes exactly one element type")),
        },
        NativeCategory::Map => {
            if !expr.fields.is_empty() && expr.fields.len() != 2 {
                return Err(malformed_arity(native, "map takes a key and a value type"));
            }
            GenericType::Map
        }
        NativeCategory::Struct => GenericType::Struct,
        scalar => {
            if !expr.fields.is_empty() {
                return Err(malformed_arity(
                    native,
                    format!("{scalar} does not take element types"),
                ));
            }
            scalar_generic(scalar)
        }
    };
    Ok(generic)
}

fn scalar_generic(category: NativeCategory) -> GenericType {
    match category {
        NativeCategory::String => GenericType::String,
        NativeCategory::Int => GenericType::Integer,
        NativeCategory::BigInt => GenericType::Long,
        NativeCategory::Float => GenericType::Float,
        NativeCategory::Double => GenericType::Double,
        NativeCategory::Decimal => GenericType::Decimal,
        NativeCategory::Boolean => GenericType::Boolean,
        NativeCategory::TinyInt => GenericType::Byte,
        NativeCategory::SmallInt => GenericType::Short,
        NativeCategory::Date => GenericType::Date,
        NativeCategory::Timestamp => GenericType::Timestamp,
        NativeCategory::Binary => GenericType::Binary,
        NativeCategory::Null => GenericType::Null,
        NativeCategory::Struct => GenericType::Struct,
        NativeCategory::Map => GenericType::Map,
        NativeCategory::Array => GenericType::Array(None),
    }
}

fn malformed_arity(native: &str, reason: impl Into<String>) -> TypeError {
    TypeError::MalformedNativeType {
        native: native.to_string(),
        position: 0,
        reason: reason.into(),
    }
}
