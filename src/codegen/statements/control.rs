//! `return`/`break` lowering.

use crate::analyze::Annotations;
use crate::ast::Expression;

use super::super::context::CodegenContext;
use super::super::expressions::{lower_expression, widen_to_i32};

pub fn lower_return<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, expr: Option<&Expression>) {
    match expr {
        Some(expr) => {
            let value = lower_expression(ctx, annotations, expr);
            let widened = widen_to_i32(ctx, value);
            ctx.builder.build_return(Some(&widened)).expect("return value");
        }
        None => {
            let zero = ctx.context.i32_type().const_int(0, false);
            ctx.builder.build_return(Some(&zero)).expect("return 0");
        }
    }
}

pub fn lower_break(ctx: &CodegenContext<'_>) {
    let exit = ctx
        .current_loop_exit()
        .expect("internal compiler error: 'break' outside of a loop");
    ctx.builder.build_unconditional_branch(exit).expect("break branch");
}
