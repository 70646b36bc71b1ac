//! Identifier read: load from the slot found by walking the codegen scope
//! stack. A miss is an internal compiler error — the semantic pass already
//! rejected any source program with a genuinely undefined name.

use inkwell::values::BasicValueEnum;

use super::super::context::CodegenContext;

pub fn lower_identifier<'ctx>(ctx: &CodegenContext<'ctx>, name: &str) -> BasicValueEnum<'ctx> {
    let (slot, ty) = ctx
        .find(name)
        .unwrap_or_else(|| panic!("internal compiler error: unresolved identifier '{name}' at codegen"));
    ctx.builder
        .build_load(ty, slot, name)
        .expect("identifier load cannot fail")
}
