//! Compiler driver: thin glue between an already-parsed tree and the
//! textual IR file. Grounded on `why_lib`'s `src/bin/yc.rs`
//! (`anyhow::Result` all the way up) and `original_source/main_compiler.py`'s
//! `compile_file` (semantic pass, abort on accumulated errors, codegen,
//! write output, report success).
//!
//! The lexer/parser that turns `.dsl` source text into an [`ast::Program`]
//! is an explicit external collaborator — `original_source` itself only
//! reaches it through ANTLR-generated code this pack doesn't carry. This
//! module's [`compile`] takes an already-parsed `Program` directly, which
//! is the faithful boundary: everything downstream of parsing lives here.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::Context as _;
use inkwell::context::Context;
use log::info;

use crate::analyze::{analyze, SemanticError};
use crate::ast::Program;
use crate::codegen::generate;

#[derive(Debug)]
pub struct CompileErrors(pub Vec<SemanticError>);

impl fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.0 {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileErrors {}

/// Runs semantic analysis then code generation over an already-parsed
/// program, returning the textual LL-IR. Mirrors
/// `original_source/main_compiler.py::compile_file`'s "abort after the
/// semantic pass if the error list is non-empty" contract.
pub fn compile(module_name: &str, program: &Program) -> Result<String, CompileErrors> {
    info!("running semantic analysis");
    let annotations = analyze(program);
    if !annotations.errors.is_empty() {
        return Err(CompileErrors(annotations.errors));
    }

    info!("running code generation");
    let context = Context::create();
    let ir = generate(&context, module_name, program, &annotations);
    Ok(ir)
}

/// Compiles `program` and writes the resulting textual IR to `output_path`,
/// matching the CLI's `<driver> <input>.dsl <output>.ll` contract.
/// The module is named after the input file's stem.
pub fn compile_to_file(input_path: &Path, output_path: &Path, program: &Program) -> anyhow::Result<()> {
    let module_name = input_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("reltable");

    let ir = compile(module_name, program).map_err(|errors| anyhow::anyhow!("{errors}"))?;

    fs::write(output_path, ir)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    info!("IR successfully written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, Literal, Position, Statement};

    fn pos() -> Position {
        Position { line: 1, column: 1 }
    }

    #[test]
    fn compile_reports_semantic_errors_without_codegen() {
        let program = Program {
            statements: vec![Statement::Expression(Expression::Identifier(
                "missing".to_string(),
                pos(),
            ))],
        };
        let result = compile("test", &program);
        assert!(result.is_err());
    }

    #[test]
    fn compile_succeeds_for_well_formed_program() {
        let program = Program {
            statements: vec![Statement::Expression(Expression::Literal(Literal::Int(1), pos()))],
        };
        let ir = compile("test", &program).expect("compiles cleanly");
        assert!(ir.contains("define i32 @main"));
    }
}
