use colspec_types::{to_generic, to_native};

use crate::config::{DtypeArgs, GenericArgs, NativeArgs, SchemaFile};
use crate::error::CliError;

pub fn dtype(args: DtypeArgs) -> Result<(), CliError> {
    let schema = SchemaFile::load(&args.schema.schema)?;
    let generic = schema.column_type(&args.column)?;
    println!("{generic}");
    Ok(())
}

pub fn native(args: NativeArgs) -> Result<(), CliError> {
    println!("{}", to_native(&args.generic)?);
    Ok(())
}

pub fn generic(args: GenericArgs) -> Result<(), CliError> {
    println!("{}", to_generic(&args.native)?);
    Ok(())
}
