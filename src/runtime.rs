//! The fixed runtime ABI this compiler links against. One function declares
//! all externally-linked symbols on a freshly created [`inkwell::module::Module`];
//! everything else in `codegen` calls `module.get_function("rt_...")` and
//! expects it to already be declared. Grounded on
//! `why_lib::codegen::context` (which declares `malloc` lazily the first time
//! a closure needs it) and `original_source/compiler/runtime_link.py`, which
//! enumerates this same symbol table against `llvmlite.ir`.

use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::AddressSpace;

use crate::types::closure_struct_type;

/// Declares every symbol in the runtime ABI on `module`. Idempotent only in
/// the sense that it is meant to run once per module, at the start of
/// codegen, before `main` or any user function is emitted.
pub fn declare_runtime(context: &Context, module: &Module) {
    let byte_ptr = context.ptr_type(AddressSpace::default());
    let closure_ty = closure_struct_type(context);
    let i32_t = context.i32_type();
    let i1_t = context.bool_type();
    let i64_t = context.i64_type();
    let void_t = context.void_type();

    module.add_function(
        "rt_create_table",
        byte_ptr.fn_type(&[byte_ptr.into()], false),
        None,
    );

    module.add_function(
        "rt_add_column",
        void_t.fn_type(&[byte_ptr.into(), byte_ptr.into(), byte_ptr.into()], false),
        None,
    );

    module.add_function("rt_add_row", void_t.fn_type(&[byte_ptr.into()], false), None);

    module.add_function("rt_write_int", void_t.fn_type(&[i32_t.into()], false), None);

    module.add_function(
        "rt_write_string",
        void_t.fn_type(&[byte_ptr.into()], false),
        None,
    );

    module.add_function("rt_write_bool", void_t.fn_type(&[i1_t.into()], false), None);

    module.add_function(
        "rt_get_int",
        i32_t.fn_type(&[byte_ptr.into(), byte_ptr.into()], false),
        None,
    );

    module.add_function(
        "rt_get_string",
        byte_ptr.fn_type(&[byte_ptr.into(), byte_ptr.into()], false),
        None,
    );

    module.add_function(
        "rt_table_select",
        byte_ptr.fn_type(&[byte_ptr.into(), closure_ty.into()], false),
        None,
    );

    module.add_function("malloc", byte_ptr.fn_type(&[i64_t.into()], false), None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_every_abi_symbol() {
        let context = Context::create();
        let module = context.create_module("test");
        declare_runtime(&context, &module);

        for name in [
            "rt_create_table",
            "rt_add_column",
            "rt_add_row",
            "rt_write_int",
            "rt_write_string",
            "rt_write_bool",
            "rt_get_int",
            "rt_get_string",
            "rt_table_select",
            "malloc",
        ] {
            assert!(module.get_function(name).is_some(), "missing {name}");
        }
    }
}
