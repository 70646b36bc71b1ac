//! Member access (`row.field`) lowering: hard-wired to `rt_get_int`,
//! matching `original_source/compiler/codegen.py` (a string-valued variant
//! exists in the runtime but isn't wired through the parser in this core).

use inkwell::values::BasicValueEnum;

use crate::analyze::Annotations;
use crate::ast::Expression;

use super::super::context::CodegenContext;
use super::lower_expression;

pub fn lower_member<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    base: &Expression,
    field: &str,
) -> BasicValueEnum<'ctx> {
    let row = lower_expression(ctx, annotations, base).into_pointer_value();
    let field_name = ctx.intern_string(field);

    let get_int = ctx
        .module
        .get_function("rt_get_int")
        .expect("runtime not declared: rt_get_int");
    let call = ctx
        .builder
        .build_call(get_int, &[row.into(), field_name.into()], "field")
        .expect("rt_get_int call");
    call.try_as_basic_value()
        .left()
        .expect("rt_get_int returns i32")
}
