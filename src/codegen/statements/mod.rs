pub mod assignment;
pub mod control;
pub mod for_stmt;
pub mod function;
pub mod if_stmt;
pub mod switch_stmt;
pub mod table;

use crate::analyze::Annotations;
use crate::ast::Statement;

use super::context::CodegenContext;

/// Single dispatch point for statement lowering. `Block` re-enters the
/// generic block-scope helper shared with
/// function/lambda bodies and `if`/`for` branches.
pub fn lower_statement<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, statement: &Statement) {
    match statement {
        Statement::FuncDecl(decl) => function::lower_func_decl(ctx, annotations, decl),
        Statement::Block(block) => lower_block_in_new_scope(ctx, annotations, block),
        Statement::If(stmt) => if_stmt::lower_if(ctx, annotations, stmt),
        Statement::For(stmt) => for_stmt::lower_for(ctx, annotations, stmt),
        Statement::Switch(stmt) => switch_stmt::lower_switch(ctx, annotations, stmt),
        Statement::Return(expr, _) => control::lower_return(ctx, annotations, expr.as_ref()),
        Statement::Break(_) => control::lower_break(ctx),
        Statement::Assignment(assignment_stmt) => assignment::lower_assignment(ctx, annotations, assignment_stmt),
        Statement::CreateTable(stmt) => table::lower_create_table(ctx, annotations, stmt),
        Statement::AddColumn(stmt) => table::lower_add_column(ctx, annotations, stmt),
        Statement::AddRow(stmt) => table::lower_add_row(ctx, annotations, stmt),
        Statement::Expression(expr) => {
            super::expressions::lower_expression(ctx, annotations, expr);
        }
    }
}

pub fn lower_block_in_new_scope<'ctx>(ctx: &CodegenContext<'ctx>, annotations: &Annotations, block: &crate::ast::Block) {
    ctx.enter_scope();
    for statement in &block.statements {
        lower_statement(ctx, annotations, statement);
    }
    ctx.exit_scope();
}
