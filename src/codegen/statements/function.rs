//! Named function declaration lowering: builds the closure like any lambda,
//! then additionally binds it to a named slot in the enclosing function so
//! it is callable by name.

use indexmap::IndexMap;

use crate::analyze::Annotations;
use crate::ast::FuncDecl;
use crate::types::closure_struct_type;

use super::super::closure::{build_closure, Body};
use super::super::context::CodegenContext;

pub fn lower_func_decl<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, decl: &FuncDecl) {
    let i32_type = ctx.context.i32_type().into();
    let param_ir_types = vec![i32_type; decl.params.len()];
    let empty_captures = IndexMap::new();
    let captures = annotations.captures.get(&decl.id).unwrap_or(&empty_captures);

    let closure_value = build_closure(
        ctx,
        annotations,
        captures,
        &decl.params,
        &param_ir_types,
        Body::Block(&decl.body),
        &decl.name,
    );

    let closure_ty = closure_struct_type(ctx.context);
    let slot = ctx.alloca_in_entry(closure_ty.into(), &decl.name);
    ctx.builder
        .build_store(slot, closure_value)
        .expect("store function closure");
    ctx.bind(decl.name.clone(), slot, closure_ty.into());
}
