pub mod binary;
pub mod call;
pub mod identifier;
pub mod lambda;
pub mod literal;
pub mod member;
pub mod select;

use inkwell::values::BasicValueEnum;

use crate::analyze::Annotations;
use crate::ast::Expression;

use super::context::CodegenContext;

/// Single dispatch point for expression lowering, mirroring the match-per-
/// variant shape of `why_lib`'s `CodeGen` trait impls, collapsed into one
/// function since this AST's `Expression` is a plain enum rather than a
/// family of distinct node types.
pub fn lower_expression<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    expr: &Expression,
) -> BasicValueEnum<'ctx> {
    match expr {
        Expression::Literal(literal, _) => literal::lower_literal(ctx, literal),
        Expression::Identifier(name, _) => identifier::lower_identifier(ctx, name),
        Expression::Add(lhs, rhs, _) => binary::lower_add(ctx, annotations, lhs, rhs),
        Expression::Compare(op, lhs, rhs, _) => binary::lower_compare(ctx, annotations, *op, lhs, rhs),
        Expression::Logical(op, lhs, rhs, _) => binary::lower_logical(ctx, annotations, *op, lhs, rhs),
        Expression::Not(inner, _) => binary::lower_not(ctx, annotations, inner),
        Expression::Call(callee, args, _) => call::lower_call(ctx, annotations, callee, args),
        Expression::Member(base, field, _) => member::lower_member(ctx, annotations, base, field),
        Expression::Index(_, _, _) => {
            panic!("internal compiler error: index expressions are not lowered in this core")
        }
        Expression::Lambda(lambda) => lambda::lower_lambda(ctx, annotations, lambda).into(),
        Expression::Select(select) => select::lower_select(ctx, annotations, select),
    }
}

/// Widens a lowered value to `i32` per the return/call-argument convention
/// used throughout this compiler: `i1` zero-extends; pointers (strings,
/// tables, rows, and closure environments reached through a return) pass
/// through `ptrtoint`, since the uniform convention has no room for a
/// pointer-sized return slot. A deliberately coarse simplification.
pub fn widen_to_i32<'ctx>(
    ctx: &CodegenContext<'ctx>,
    value: BasicValueEnum<'ctx>,
) -> inkwell::values::IntValue<'ctx> {
    let i32_type = ctx.context.i32_type();
    match value {
        BasicValueEnum::IntValue(iv) if iv.get_type().get_bit_width() == 1 => ctx
            .builder
            .build_int_z_extend(iv, i32_type, "widen_bool")
            .expect("zext bool to i32"),
        BasicValueEnum::IntValue(iv) => iv,
        BasicValueEnum::PointerValue(pv) => ctx
            .builder
            .build_ptr_to_int(pv, i32_type, "ptr_as_i32")
            .expect("ptrtoint"),
        BasicValueEnum::FloatValue(fv) => ctx
            .builder
            .build_float_to_signed_int(fv, i32_type, "decimal_as_i32")
            .expect("fptosi"),
        _ => i32_type.const_int(0, false),
    }
}
