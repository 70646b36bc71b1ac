//! `if`/`elif`/`else` chain lowering.

use crate::analyze::Annotations;
use crate::ast::IfStmt;

use super::super::context::CodegenContext;
use super::super::expressions::lower_expression;
use super::lower_block_in_new_scope;

pub fn lower_if<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, stmt: &IfStmt) {
    let function = ctx.current_function();
    let if_end = ctx.context.append_basic_block(function, "if.end");

    for (i, condition) in stmt.conditions.iter().enumerate() {
        let cond_value = lower_expression(ctx, annotations, condition).into_int_value();

        let then_block = ctx.context.append_basic_block(function, &format!("then.{i}"));
        let next_block = ctx.context.append_basic_block(function, &format!("next.{i}"));

        ctx.builder
            .build_conditional_branch(cond_value, then_block, next_block)
            .expect("if condition branch");

        ctx.builder.position_at_end(then_block);
        lower_block_in_new_scope(ctx, annotations, &stmt.branches[i]);
        if !ctx.block_is_terminated() {
            ctx.builder
                .build_unconditional_branch(if_end)
                .expect("branch to if.end");
        }

        ctx.builder.position_at_end(next_block);
    }

    if let Some(else_branch) = &stmt.else_branch {
        lower_block_in_new_scope(ctx, annotations, else_branch);
    }
    if !ctx.block_is_terminated() {
        ctx.builder
            .build_unconditional_branch(if_end)
            .expect("branch to if.end");
    }

    ctx.builder.position_at_end(if_end);
}
