pub mod error;
pub mod expr;
pub mod generic;
pub mod mapping;
pub mod native;

pub use error::TypeError;
pub use expr::{TypeExpr, TypeField};
pub use generic::GenericType;
pub use mapping::{category_of, split_container, to_generic, to_native};
pub use native::NativeCategory;
