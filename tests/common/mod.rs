//! Shared `ast::Program` builders for the fixture-driven integration tests.
//!
//! There is no lexer/parser in this crate, so these tests build
//! the typed parse tree by hand — the same boundary contract a real parser
//! would hand to `reltablec::driver::compile` — and assert on the structure
//! of the emitted IR, since the tests cannot link and run the result.

#![allow(dead_code)]

use reltablec::ast::*;
use reltablec::driver::compile;

pub fn pos() -> Position {
    Position { line: 1, column: 1 }
}

pub fn int(n: i64) -> Expression {
    Expression::Literal(Literal::Int(n), pos())
}

pub fn string(s: &str) -> Expression {
    Expression::Literal(Literal::Str(s.to_string()), pos())
}

pub fn ident(name: &str) -> Expression {
    Expression::Identifier(name.to_string(), pos())
}

pub fn add(lhs: Expression, rhs: Expression) -> Expression {
    Expression::Add(Box::new(lhs), Box::new(rhs), pos())
}

pub fn call(callee: Expression, args: Vec<Expression>) -> Expression {
    Expression::Call(Box::new(callee), args, pos())
}

pub fn print_stmt(arg: Expression) -> Statement {
    Statement::Expression(call(ident("print"), vec![arg]))
}

pub fn assign(name: &str, value: Expression) -> Statement {
    Statement::Assignment(Assignment {
        name: name.to_string(),
        value,
        position: pos(),
    })
}

pub fn param(name: &str) -> Param {
    Param {
        name: name.to_string(),
        type_name: None,
        position: pos(),
    }
}

pub fn program(statements: Vec<Statement>) -> Program {
    Program { statements }
}

pub fn compile_ir(program: &Program) -> String {
    compile("fixture", program).expect("fixture program compiles cleanly")
}
