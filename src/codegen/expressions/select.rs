//! `select tbl where <pred>` lowering. The predicate lambda is lowered
//! through the same closure machinery as any other lambda, except its
//! single row parameter is given a pointer IR type rather than the usual
//! `i32` — the runtime invokes it with a `ROW` handle, and member access on
//! that parameter (`row.field`) requires a pointer to feed `rt_get_int`
//! (see `expressions::member`). This is the one deliberate deviation from
//! the literal-`i32`-parameters convention used everywhere else: a
//! non-integer argument is passed as a pointer at the source level, and a
//! row handle is exactly such an argument.

use inkwell::values::BasicValueEnum;
use inkwell::AddressSpace;

use crate::analyze::Annotations;
use crate::ast::{Expression, Lambda, SelectExpr};
use indexmap::IndexMap;

use super::super::closure::{build_closure, Body};
use super::super::context::CodegenContext;
use super::lower_expression;

pub fn lower_select<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    select: &SelectExpr,
) -> BasicValueEnum<'ctx> {
    let table = lower_expression(ctx, annotations, &select.source);

    let Some(where_clause) = &select.where_clause else {
        return table;
    };

    let predicate = match where_clause.predicate.as_ref() {
        Expression::Lambda(lambda) => lambda,
        _ => panic!("internal compiler error: malformed where clause (predicate is not a lambda)"),
    };

    let closure = lower_predicate(ctx, annotations, predicate);

    let select_fn = ctx
        .module
        .get_function("rt_table_select")
        .expect("runtime not declared: rt_table_select");
    let call = ctx
        .builder
        .build_call(select_fn, &[table.into(), closure.into()], "select")
        .expect("rt_table_select call");
    call.try_as_basic_value()
        .left()
        .expect("rt_table_select returns a table handle")
}

fn lower_predicate<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    lambda: &Lambda,
) -> BasicValueEnum<'ctx> {
    let row_ptr_type = ctx.context.ptr_type(AddressSpace::default()).into();
    let param_ir_types = vec![row_ptr_type; lambda.params.len()];
    let empty_captures = IndexMap::new();
    let captures = annotations.captures.get(&lambda.id).unwrap_or(&empty_captures);

    build_closure(
        ctx,
        annotations,
        captures,
        &lambda.params,
        &param_ir_types,
        Body::from(&lambda.body),
        "select_pred",
    )
    .into()
}
