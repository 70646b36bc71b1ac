//! Code generator entry point. Declares the
//! runtime ABI, builds `int main()`, lowers every top-level statement into
//! it, and renders the finished module as textual LL-IR via
//! `Module::print_to_string()` — the closest match to the original
//! `llvmlite` pipeline's assembly output.

pub mod closure;
pub mod context;
pub mod expressions;
pub mod statements;

use inkwell::context::Context;

use crate::analyze::Annotations;
use crate::ast::Program;
use crate::runtime::declare_runtime;

use context::CodegenContext;

/// Lowers `program` (with its capture annotations) into a complete LLVM
/// module and returns the module's textual IR.
pub fn generate(context: &Context, module_name: &str, program: &Program, annotations: &Annotations) -> String {
    let module = context.create_module(module_name);
    declare_runtime(context, &module);

    let ctx = CodegenContext::new(context, module);

    let main_type = context.i32_type().fn_type(&[], false);
    let main_fn = ctx.declare_function("main", main_type);
    let entry = context.append_basic_block(main_fn, "entry");
    ctx.builder.position_at_end(entry);
    ctx.enter_function(entry);

    for statement in &program.statements {
        statements::lower_statement(&ctx, annotations, statement);
    }

    if !ctx.block_is_terminated() {
        let zero = context.i32_type().const_int(0, false);
        ctx.builder.build_return(Some(&zero)).expect("implicit main return 0");
    }
    ctx.exit_function();

    ctx.module.print_to_string().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::ast::*;

    fn pos() -> Position {
        Position { line: 1, column: 1 }
    }

    #[test]
    fn empty_program_emits_main_returning_zero() {
        let program = Program { statements: vec![] };
        let annotations = analyze(&program);
        let context = Context::create();
        let ir = generate(&context, "test", &program, &annotations);
        assert!(ir.contains("define i32 @main"));
        assert!(ir.contains("ret i32 0"));
    }

    #[test]
    fn assignment_then_print_lowers_without_panicking() {
        // x = 5; print(x)
        let program = Program {
            statements: vec![
                Statement::Assignment(Assignment {
                    name: "x".to_string(),
                    value: Expression::Literal(Literal::Int(5), pos()),
                    position: pos(),
                }),
                Statement::Expression(Expression::Call(
                    Box::new(Expression::Identifier("print".to_string(), pos())),
                    vec![Expression::Identifier("x".to_string(), pos())],
                    pos(),
                )),
            ],
        };
        let annotations = analyze(&program);
        let context = Context::create();
        let ir = generate(&context, "test", &program, &annotations);
        assert!(ir.contains("call void @rt_write_int"));
    }

    #[test]
    fn function_declaration_emits_a_callable_closure() {
        // func inc(n) { return n + 1 } print(inc(41))
        let decl = FuncDecl {
            id: NodeId(0),
            name: "inc".to_string(),
            params: vec![Param {
                name: "n".to_string(),
                type_name: None,
                position: pos(),
            }],
            body: Block {
                statements: vec![Statement::Return(
                    Some(Expression::Add(
                        Box::new(Expression::Identifier("n".to_string(), pos())),
                        Box::new(Expression::Literal(Literal::Int(1), pos())),
                        pos(),
                    )),
                    pos(),
                )],
            },
            position: pos(),
        };
        let program = Program {
            statements: vec![
                Statement::FuncDecl(decl),
                Statement::Expression(Expression::Call(
                    Box::new(Expression::Identifier("print".to_string(), pos())),
                    vec![Expression::Call(
                        Box::new(Expression::Identifier("inc".to_string(), pos())),
                        vec![Expression::Literal(Literal::Int(41), pos())],
                        pos(),
                    )],
                    pos(),
                )),
            ],
        };
        let annotations = analyze(&program);
        let context = Context::create();
        let ir = generate(&context, "test", &program, &annotations);
        assert!(ir.contains("define i32 @inc_lambda_0"));
    }
}
