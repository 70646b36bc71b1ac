//! Table-statement lowering: `create_table`, `add_column`, `add_row`.

use inkwell::values::BasicValue;

use crate::analyze::Annotations;
use crate::ast::{AddColumn, AddRow, CreateTable};

use super::super::context::CodegenContext;
use super::super::expressions::lower_expression;

pub fn lower_create_table<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, stmt: &CreateTable) {
    let name = lower_expression(ctx, annotations, &stmt.name_expr);

    let create = ctx
        .module
        .get_function("rt_create_table")
        .expect("runtime not declared: rt_create_table");
    let call = ctx
        .builder
        .build_call(create, &[name.into()], "table")
        .expect("rt_create_table call");
    let handle = call
        .try_as_basic_value()
        .left()
        .expect("rt_create_table returns a table handle");

    if let Some(binding) = &stmt.binding {
        let slot = ctx.alloca_in_entry(handle.get_type(), binding);
        ctx.builder.build_store(slot, handle).expect("store table handle");
        ctx.bind(binding.clone(), slot, handle.get_type());
    }
}

pub fn lower_add_column<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, stmt: &AddColumn) {
    let table = lower_expression(ctx, annotations, &stmt.table);
    let name = lower_expression(ctx, annotations, &stmt.name);
    let type_tag = ctx.intern_string(&stmt.type_tag);

    let add_column = ctx
        .module
        .get_function("rt_add_column")
        .expect("runtime not declared: rt_add_column");
    ctx.builder
        .build_call(add_column, &[table.into(), name.into(), type_tag.into()], "add_column")
        .expect("rt_add_column call");
}

pub fn lower_add_row<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, stmt: &AddRow) {
    let table = lower_expression(ctx, annotations, &stmt.table);

    let add_row = ctx
        .module
        .get_function("rt_add_row")
        .expect("runtime not declared: rt_add_row");
    ctx.builder
        .build_call(add_row, &[table.into()], "add_row")
        .expect("rt_add_row call");
}
