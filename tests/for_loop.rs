//! `for i in 1..3 { print(i) }` must lower to a
//! condition/body/end three-block loop with the iterator incremented on
//! each pass.

mod common;

use common::*;
use reltablec::ast::*;

#[test]
fn for_loop_emits_condition_body_and_increment_blocks() {
    let for_stmt = ForStmt {
        iterator: "i".to_string(),
        low: int(1),
        high: int(3),
        body: Block {
            statements: vec![print_stmt(ident("i"))],
        },
        position: pos(),
    };

    let prog = program(vec![Statement::For(for_stmt)]);
    let ir = compile_ir(&prog);

    assert!(ir.contains("for.cond"));
    assert!(ir.contains("for.body"));
    assert!(ir.contains("for.end"));
    assert!(ir.contains("call void @rt_write_int"));
    assert!(ir.contains("icmp sle"));
}
