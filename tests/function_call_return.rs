//! `func inc(n) { return n + 1 } print(inc(41))` must emit a
//! callable closure for `inc` and an indirect call through it at the call
//! site.

mod common;

use common::*;
use reltablec::ast::*;

#[test]
fn named_function_is_emitted_as_a_closure_and_called_indirectly() {
    let decl = FuncDecl {
        id: NodeId(0),
        name: "inc".to_string(),
        params: vec![param("n")],
        body: Block {
            statements: vec![Statement::Return(Some(add(ident("n"), int(1))), pos())],
        },
        position: pos(),
    };

    let prog = program(vec![
        Statement::FuncDecl(decl),
        print_stmt(call(ident("inc"), vec![int(41)])),
    ]);
    let ir = compile_ir(&prog);

    assert!(ir.contains("define i32 @inc_lambda_0"));
    assert!(ir.contains("call void @rt_write_int"));
    // indirect call through the extracted function pointer, not a direct
    // call to a symbol named `inc`
    assert!(!ir.contains("call i32 @inc("));
}
