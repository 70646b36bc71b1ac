//! Ordinary lambda-expression lowering. Parameters use the literal `i32`
//! convention used throughout this compiler; the one exception (select
//! predicates) is handled separately in `expressions::select`, which calls
//! `closure::build_closure` directly.

use indexmap::IndexMap;
use inkwell::values::StructValue;

use crate::analyze::Annotations;
use crate::ast::Lambda;

use super::super::closure::{build_closure, Body};
use super::super::context::CodegenContext;

pub fn lower_lambda<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    lambda: &Lambda,
) -> StructValue<'ctx> {
    let i32_type = ctx.context.i32_type().into();
    let param_ir_types = vec![i32_type; lambda.params.len()];
    let empty_captures = IndexMap::new();
    let captures = annotations.captures.get(&lambda.id).unwrap_or(&empty_captures);

    build_closure(
        ctx,
        annotations,
        captures,
        &lambda.params,
        &param_ir_types,
        Body::from(&lambda.body),
        "lambda",
    )
}
