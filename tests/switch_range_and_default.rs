//! A switch with a range case, a value case, and a default
//! must never fall through — each case body branches straight to the
//! shared `switch.end`.

mod common;

use common::*;
use reltablec::ast::*;

#[test]
fn switch_emits_range_and_value_cases_with_a_shared_end_block() {
    let stmt = SwitchStmt {
        scrutinee: Some(ident("v")),
        cases: vec![
            SwitchCase {
                labels: vec![CaseLabel::Range(int(1), int(3))],
                body: vec![print_stmt(string("small"))],
            },
            SwitchCase {
                labels: vec![CaseLabel::Value(int(5))],
                body: vec![print_stmt(string("five"))],
            },
        ],
        default: Some(vec![print_stmt(string("other"))]),
        position: pos(),
    };

    let prog = program(vec![assign("v", int(2)), Statement::Switch(stmt)]);
    let ir = compile_ir(&prog);

    assert!(ir.contains("case.check.0"));
    assert!(ir.contains("case.check.1"));
    assert!(ir.contains("switch.end"));
    assert!(ir.contains("icmp sge"));
    assert!(ir.contains("icmp sle"));
    assert!(ir.contains("icmp eq"));
    assert!(ir.contains("call void @rt_write_string"));
}
