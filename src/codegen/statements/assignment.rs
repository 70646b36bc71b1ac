//! Assignment lowering. An assignment to a not-yet-existing name creates a
//! new slot in the entry block and stores into it; an assignment to an
//! existing name reuses its slot.

use inkwell::values::BasicValue;

use crate::analyze::Annotations;
use crate::ast::Assignment;

use super::super::context::CodegenContext;
use super::super::expressions::lower_expression;

pub fn lower_assignment<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, assignment: &Assignment) {
    let value = lower_expression(ctx, annotations, &assignment.value);

    let (slot, _ty) = match ctx.find(&assignment.name) {
        Some(existing) => existing,
        None => {
            let ty = value.get_type();
            let slot = ctx.alloca_in_entry(ty, &assignment.name);
            ctx.bind(assignment.name.clone(), slot, ty);
            (slot, ty)
        }
    };
    ctx.builder.build_store(slot, value).expect("store assignment");
}
