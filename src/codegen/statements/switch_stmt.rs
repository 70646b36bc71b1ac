//! `switch`/`case`/`default` lowering. Cases never fall through: each
//! `case.body` ends with a branch straight to the shared `switch.end`.

use inkwell::values::IntValue;
use inkwell::IntPredicate;

use crate::analyze::Annotations;
use crate::ast::{CaseLabel, SwitchStmt};

use super::super::context::CodegenContext;
use super::super::expressions::lower_expression;
use super::lower_statement;

pub fn lower_switch<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, stmt: &SwitchStmt) {
    let function = ctx.current_function();
    let switch_end = ctx.context.append_basic_block(function, "switch.end");

    let scrutinee = stmt
        .scrutinee
        .as_ref()
        .map(|expr| lower_expression(ctx, annotations, expr).into_int_value())
        .unwrap_or_else(|| panic!("internal compiler error: switch without a scrutinee"));

    for (i, case) in stmt.cases.iter().enumerate() {
        let check_block = ctx.context.append_basic_block(function, &format!("case.check.{i}"));
        if !ctx.block_is_terminated() {
            ctx.builder
                .build_unconditional_branch(check_block)
                .expect("branch into case.check");
        }
        ctx.builder.position_at_end(check_block);

        let body_block = ctx.context.append_basic_block(function, &format!("case.body.{i}"));
        let next_block = ctx.context.append_basic_block(function, &format!("case.next.{i}"));

        let matches = fold_labels(ctx, annotations, &case.labels, scrutinee);
        ctx.builder
            .build_conditional_branch(matches, body_block, next_block)
            .expect("case dispatch branch");

        ctx.builder.position_at_end(body_block);
        for statement in &case.body {
            lower_statement(ctx, annotations, statement);
        }
        if !ctx.block_is_terminated() {
            ctx.builder
                .build_unconditional_branch(switch_end)
                .expect("branch to switch.end");
        }

        ctx.builder.position_at_end(next_block);
    }

    if let Some(default) = &stmt.default {
        for statement in default {
            lower_statement(ctx, annotations, statement);
        }
    }
    if !ctx.block_is_terminated() {
        ctx.builder
            .build_unconditional_branch(switch_end)
            .expect("branch to switch.end");
    }

    ctx.builder.position_at_end(switch_end);
}

fn fold_labels<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    labels: &[CaseLabel],
    scrutinee: IntValue<'ctx>,
) -> IntValue<'ctx> {
    let mut result: Option<IntValue<'ctx>> = None;
    for label in labels {
        let condition = match label {
            CaseLabel::Value(expr) => {
                let value = lower_expression(ctx, annotations, expr).into_int_value();
                ctx.builder
                    .build_int_compare(IntPredicate::EQ, scrutinee, value, "case.eq")
                    .expect("case equality compare")
            }
            CaseLabel::Range(low, high) => {
                let low_value = lower_expression(ctx, annotations, low).into_int_value();
                let high_value = lower_expression(ctx, annotations, high).into_int_value();
                let above_low = ctx
                    .builder
                    .build_int_compare(IntPredicate::SGE, scrutinee, low_value, "case.ge")
                    .expect("case lower bound compare");
                let below_high = ctx
                    .builder
                    .build_int_compare(IntPredicate::SLE, scrutinee, high_value, "case.le")
                    .expect("case upper bound compare");
                ctx.builder
                    .build_and(above_low, below_high, "case.range")
                    .expect("case range fold")
            }
        };
        result = Some(match result {
            None => condition,
            Some(accumulated) => ctx
                .builder
                .build_or(accumulated, condition, "case.or")
                .expect("case label fold"),
        });
    }
    result.expect("internal compiler error: case with no labels")
}
