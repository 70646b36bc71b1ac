//! Call expression lowering, plus the `write`/`print` intrinsic dispatch
//! supplemented from `original_source/analyzer/semantic.py`'s builtin
//! registration: these two names have no closure value at all and are
//! routed straight to the matching `rt_write_*` runtime symbol, chosen by
//! the LLVM representation of the single argument actually produced.

use inkwell::values::BasicValueEnum;

use crate::analyze::Annotations;
use crate::ast::Expression;
use crate::types::closure_impl_fn_type;

use super::super::closure::extract_closure_fields;
use super::super::context::CodegenContext;
use super::lower_expression;

const DISPLAY_INTRINSICS: [&str; 2] = ["print", "write"];

pub fn lower_call<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    callee: &Expression,
    args: &[Expression],
) -> BasicValueEnum<'ctx> {
    if let Expression::Identifier(name, _) = callee {
        if DISPLAY_INTRINSICS.contains(&name.as_str()) {
            return lower_display_call(ctx, annotations, args);
        }
    }

    let closure = lower_expression(ctx, annotations, callee).into_struct_value();
    let (fn_ptr, env_ptr) = extract_closure_fields(ctx, closure);

    let arg_values: Vec<BasicValueEnum<'ctx>> = args
        .iter()
        .map(|arg| lower_expression(ctx, annotations, arg))
        .collect();

    let fn_type = closure_impl_fn_type(ctx.context, args.len());
    let mut call_args: Vec<inkwell::values::BasicMetadataValueEnum> = vec![env_ptr.into()];
    call_args.extend(arg_values.into_iter().map(|value| super::widen_to_i32(ctx, value).into()));

    let call = ctx
        .builder
        .build_indirect_call(fn_type, fn_ptr.into_pointer_value(), &call_args, "call")
        .expect("indirect call");
    call.try_as_basic_value()
        .left()
        .unwrap_or_else(|| ctx.context.i32_type().const_int(0, false).into())
}

fn lower_display_call<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    args: &[Expression],
) -> BasicValueEnum<'ctx> {
    let arg = args
        .first()
        .expect("internal compiler error: print/write called with no arguments");
    let value = lower_expression(ctx, annotations, arg);

    let (symbol, call_value) = match value {
        BasicValueEnum::IntValue(iv) if iv.get_type().get_bit_width() == 1 => ("rt_write_bool", value),
        BasicValueEnum::IntValue(_) => ("rt_write_int", value),
        BasicValueEnum::PointerValue(_) => ("rt_write_string", value),
        BasicValueEnum::FloatValue(_) => ("rt_write_int", super::widen_to_i32(ctx, value).into()),
        _ => ("rt_write_int", super::widen_to_i32(ctx, value).into()),
    };

    let function = ctx
        .module
        .get_function(symbol)
        .unwrap_or_else(|| panic!("runtime not declared: {symbol}"));
    ctx.builder
        .build_call(function, &[call_value.into()], "display")
        .expect("display call");

    ctx.context.i32_type().const_int(0, false).into()
}
