//! Binary/unary operator lowering. Arithmetic `+` always lowers to
//! integer add regardless of operand type — string concatenation is an
//! explicit non-goal of this core.

use inkwell::values::BasicValueEnum;

use crate::analyze::Annotations;
use crate::ast::{CompareOp, Expression, LogicalOp};

use super::super::context::CodegenContext;
use super::{lower_expression, widen_to_i32};

pub fn lower_add<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    lhs: &Expression,
    rhs: &Expression,
) -> BasicValueEnum<'ctx> {
    let lhs_value = widen_to_i32(ctx, lower_expression(ctx, annotations, lhs));
    let rhs_value = widen_to_i32(ctx, lower_expression(ctx, annotations, rhs));
    ctx.builder
        .build_int_add(lhs_value, rhs_value, "add")
        .expect("int add")
        .into()
}

pub fn lower_compare<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    op: CompareOp,
    lhs: &Expression,
    rhs: &Expression,
) -> BasicValueEnum<'ctx> {
    let lhs_value = widen_to_i32(ctx, lower_expression(ctx, annotations, lhs));
    let rhs_value = widen_to_i32(ctx, lower_expression(ctx, annotations, rhs));
    let predicate = match op {
        CompareOp::Eq => inkwell::IntPredicate::EQ,
        CompareOp::Ne => inkwell::IntPredicate::NE,
        CompareOp::Lt => inkwell::IntPredicate::SLT,
        CompareOp::Le => inkwell::IntPredicate::SLE,
        CompareOp::Gt => inkwell::IntPredicate::SGT,
        CompareOp::Ge => inkwell::IntPredicate::SGE,
    };
    ctx.builder
        .build_int_compare(predicate, lhs_value, rhs_value, "cmp")
        .expect("int compare")
        .into()
}

pub fn lower_logical<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    op: LogicalOp,
    lhs: &Expression,
    rhs: &Expression,
) -> BasicValueEnum<'ctx> {
    let lhs_value = lower_expression(ctx, annotations, lhs).into_int_value();
    let rhs_value = lower_expression(ctx, annotations, rhs).into_int_value();
    match op {
        LogicalOp::And => ctx
            .builder
            .build_and(lhs_value, rhs_value, "and")
            .expect("bitwise and")
            .into(),
        LogicalOp::Or => ctx
            .builder
            .build_or(lhs_value, rhs_value, "or")
            .expect("bitwise or")
            .into(),
    }
}

pub fn lower_not<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    inner: &Expression,
) -> BasicValueEnum<'ctx> {
    let value = lower_expression(ctx, annotations, inner).into_int_value();
    ctx.builder.build_not(value, "not").expect("bitwise not").into()
}
