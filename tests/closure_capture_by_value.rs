//! `x = 10; f = (y) => y + x; print(f(5))` — the lambda
//! captures `x` by value at construction time, via a heap-allocated
//! environment struct populated once. Since these tests can't link and run
//! the IR, this asserts on the structural evidence of that capture: a
//! `malloc` call and an environment field store/reload pair, rather than
//! re-running with a mutated `x` afterwards.

mod common;

use common::*;
use reltablec::ast::*;

#[test]
fn lambda_capturing_an_outer_binding_allocates_and_populates_an_environment() {
    let lambda = Lambda {
        id: NodeId(0),
        params: vec![param("y")],
        body: LambdaBody::Expression(Box::new(add(ident("y"), ident("x")))),
        position: pos(),
    };

    let prog = program(vec![
        assign("x", int(10)),
        assign("f", Expression::Lambda(lambda)),
        print_stmt(call(ident("f"), vec![int(5)])),
    ]);
    let ir = compile_ir(&prog);

    assert!(ir.contains("define i32 @lambda_lambda_0"));
    assert!(ir.contains("call i8* @malloc") || ir.contains("call ptr @malloc"));
    assert!(ir.contains("env_field_x"));
    assert!(ir.contains("call void @rt_write_int"));
}
