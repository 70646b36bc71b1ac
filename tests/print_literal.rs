//! `x = 5; print(x)` must lower to a store of 5 followed by
//! a call into the int-printing runtime symbol.

mod common;

use common::*;

#[test]
fn assignment_then_print_emits_rt_write_int() {
    let prog = program(vec![assign("x", int(5)), print_stmt(ident("x"))]);
    let ir = compile_ir(&prog);

    assert!(ir.contains("define i32 @main"));
    assert!(ir.contains("call void @rt_write_int"));
    assert!(ir.contains("store i32 5"));
}
