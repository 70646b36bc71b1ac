//! Counted-loop lowering.

use inkwell::IntPredicate;

use crate::analyze::Annotations;
use crate::ast::ForStmt;

use super::super::context::CodegenContext;
use super::super::expressions::lower_expression;
use super::lower_statement;

pub fn lower_for<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, stmt: &ForStmt) {
    let low = lower_expression(ctx, annotations, &stmt.low).into_int_value();
    let high = lower_expression(ctx, annotations, &stmt.high).into_int_value();

    let function = ctx.current_function();
    let i32_type = ctx.context.i32_type();
    let iter_slot = ctx.alloca_in_entry(i32_type.into(), &stmt.iterator);
    ctx.builder.build_store(iter_slot, low).expect("store initial iterator");

    let cond_block = ctx.context.append_basic_block(function, "for.cond");
    let body_block = ctx.context.append_basic_block(function, "for.body");
    let end_block = ctx.context.append_basic_block(function, "for.end");

    ctx.builder
        .build_unconditional_branch(cond_block)
        .expect("branch to for.cond");

    ctx.builder.position_at_end(cond_block);
    let iter_value = ctx
        .builder
        .build_load(i32_type, iter_slot, "iter")
        .expect("load iterator")
        .into_int_value();
    let keep_going = ctx
        .builder
        .build_int_compare(IntPredicate::SLE, iter_value, high, "for.test")
        .expect("iterator bound compare");
    ctx.builder
        .build_conditional_branch(keep_going, body_block, end_block)
        .expect("for.cond branch");

    ctx.builder.position_at_end(body_block);
    ctx.enter_scope();
    ctx.bind(stmt.iterator.clone(), iter_slot, i32_type.into());
    ctx.push_loop_exit(end_block);
    for statement in &stmt.body.statements {
        lower_statement(ctx, annotations, statement);
    }
    ctx.pop_loop_exit();
    ctx.exit_scope();

    if !ctx.block_is_terminated() {
        let current = ctx
            .builder
            .build_load(i32_type, iter_slot, "iter")
            .expect("reload iterator")
            .into_int_value();
        let one = i32_type.const_int(1, false);
        let next = ctx.builder.build_int_add(current, one, "iter.next").expect("increment");
        ctx.builder.build_store(iter_slot, next).expect("store incremented iterator");
        ctx.builder
            .build_unconditional_branch(cond_block)
            .expect("branch back to for.cond");
    }

    ctx.builder.position_at_end(end_block);
}
