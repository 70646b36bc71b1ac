//! The source-level type lattice and its mapping onto LLVM types. Grounded
//! on `why_lib::typechecker::types::Type` and
//! `why_lib::codegen::context::CodegenContext::get_llvm_type` for the shape
//! of the conversion, adapted to RelTable's closed, mostly-`ANY` lattice
//! rather than Y-lang's full structural type system.

use inkwell::context::Context;
use inkwell::types::{BasicMetadataTypeEnum, BasicTypeEnum, FunctionType};
use inkwell::AddressSpace;

/// The closed set of source-level types. `Any` is the bottom/unknown type
/// used where inference is incomplete; it is never an error by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Decimal,
    String,
    Bool,
    Table,
    Row,
    Function,
    Void,
    Any,
}

impl Type {
    /// Maps a source type to its LLVM representation:
    /// `i32` for INT, `double` for DECIMAL, `i1` for BOOL, an opaque pointer
    /// for STRING/TABLE/ROW, the two-pointer closure struct for FUNCTION,
    /// void for VOID. `ANY` falls back to the opaque pointer representation,
    /// matching the runtime's handle-everything-as-byte-pointer convention.
    pub fn llvm_basic_type<'ctx>(self, context: &'ctx Context) -> Option<BasicTypeEnum<'ctx>> {
        match self {
            Type::Int => Some(context.i32_type().into()),
            Type::Decimal => Some(context.f64_type().into()),
            Type::Bool => Some(context.bool_type().into()),
            Type::String | Type::Table | Type::Row | Type::Any => {
                Some(context.ptr_type(AddressSpace::default()).into())
            }
            Type::Function => Some(closure_struct_type(context).into()),
            Type::Void => None,
        }
    }

    pub fn llvm_metadata_type<'ctx>(self, context: &'ctx Context) -> BasicMetadataTypeEnum<'ctx> {
        match self.llvm_basic_type(context) {
            Some(basic) => basic.into(),
            None => context.ptr_type(AddressSpace::default()).into(),
        }
    }
}

/// The uniform closure representation: `{ byte*, byte* }` — function pointer
/// then environment pointer.
pub fn closure_struct_type(context: &Context) -> inkwell::types::StructType<'_> {
    let byte_ptr = context.ptr_type(AddressSpace::default());
    context.struct_type(&[byte_ptr.into(), byte_ptr.into()], false)
}

/// Builds the LLVM function type for a target with `N` source arguments by
/// prepending one byte-pointer parameter (the environment) to `N` `i32`
/// parameters — the uniform closure-call convention. Every lowered function
/// returns `i32`.
pub fn closure_impl_fn_type<'ctx>(context: &'ctx Context, arity: usize) -> FunctionType<'ctx> {
    let byte_ptr = context.ptr_type(AddressSpace::default());
    let mut params: Vec<BasicMetadataTypeEnum> = Vec::with_capacity(arity + 1);
    params.push(byte_ptr.into());
    for _ in 0..arity {
        params.push(context.i32_type().into());
    }
    context.i32_type().fn_type(&params, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_maps_to_i32() {
        let context = Context::create();
        let ty = Type::Int.llvm_basic_type(&context).unwrap();
        assert!(ty.is_int_type());
        assert_eq!(ty.into_int_type().get_bit_width(), 32);
    }

    #[test]
    fn void_has_no_basic_type() {
        let context = Context::create();
        assert!(Type::Void.llvm_basic_type(&context).is_none());
    }

    #[test]
    fn closure_impl_fn_type_prepends_env_pointer() {
        let context = Context::create();
        let fn_type = closure_impl_fn_type(&context, 2);
        assert_eq!(fn_type.count_param_types(), 3);
    }
}
