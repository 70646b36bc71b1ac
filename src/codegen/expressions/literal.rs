//! Literal lowering. Grounded on
//! `why_lib::codegen::expressions::ast_string`'s global-string-pointer
//! pattern, routed through `CodegenContext::intern_string` so that two
//! equal string literals always lower to the same pointer.

use inkwell::values::BasicValueEnum;

use crate::ast::Literal;

use super::super::context::CodegenContext;

pub fn lower_literal<'ctx>(ctx: &CodegenContext<'ctx>, literal: &Literal) -> BasicValueEnum<'ctx> {
    match literal {
        Literal::Int(value) => ctx
            .context
            .i32_type()
            .const_int(*value as u64, true)
            .into(),
        Literal::Decimal(value) => ctx.context.f64_type().const_float(*value).into(),
        Literal::Str(value) => ctx.intern_string(value).into(),
        Literal::Bool(value) => ctx
            .context
            .bool_type()
            .const_int(*value as u64, false)
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use inkwell::context::Context;

    use super::*;

    #[test]
    fn equal_string_literals_intern_to_one_pointer() {
        let context = Context::create();
        let module = context.create_module("test");
        let ctx = CodegenContext::new(&context, module);
        let fn_type = context.void_type().fn_type(&[], false);
        let function = ctx.declare_function("scratch", fn_type);
        let entry = context.append_basic_block(function, "entry");
        ctx.builder.position_at_end(entry);

        let a = lower_literal(&ctx, &Literal::Str("people".to_string()));
        let b = lower_literal(&ctx, &Literal::Str("people".to_string()));

        assert_eq!(a.into_pointer_value(), b.into_pointer_value());
    }

    #[test]
    fn int_literal_lowers_to_i32_constant() {
        let context = Context::create();
        let module = context.create_module("test");
        let ctx = CodegenContext::new(&context, module);
        let fn_type = context.void_type().fn_type(&[], false);
        let function = ctx.declare_function("scratch", fn_type);
        let entry = context.append_basic_block(function, "entry");
        ctx.builder.position_at_end(entry);

        let value = lower_literal(&ctx, &Literal::Int(42));
        assert!(value.is_int_value());
    }
}
