pub mod error;
pub mod request;
pub mod resolve;
pub mod schema;
pub mod spec;
pub mod validate;

pub use colspec_types::{GenericType, NativeCategory, TypeError};
pub use error::{ColumnError, ErrorKind};
pub use request::ResolveRequest;
pub use resolve::{names_by_native_category, resolve, resolve_from, ResolveOptions, Resolved};
pub use schema::{Column, Schema, SchemaProvider};
pub use spec::{ColumnId, ColumnParams, ColumnSpec};
pub use validate::{validate_exist, validate_spec_shape};
