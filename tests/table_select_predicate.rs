//! Building a table, adding a column and a row, then
//! `select`-ing with a predicate that reads a row member must lower to a
//! single `rt_table_select` call whose predicate closure reads the field
//! through `rt_get_int`, and the result must be bound as a fresh table
//! handle distinct from the source.

mod common;

use common::*;
use reltablec::ast::*;

#[test]
fn select_with_member_predicate_calls_rt_table_select_and_rt_get_int() {
    let create = CreateTable {
        binding: Some("t".to_string()),
        name_expr: string("people"),
        position: pos(),
    };
    let add_column = AddColumn {
        table: ident("t"),
        name: string("age"),
        type_tag: "int".to_string(),
        position: pos(),
    };
    let add_row = AddRow {
        table: ident("t"),
        position: pos(),
    };

    let predicate = Lambda {
        id: NodeId(0),
        params: vec![param("row")],
        body: LambdaBody::Expression(Box::new(Expression::Compare(
            CompareOp::Ge,
            Box::new(Expression::Member(Box::new(ident("row")), "age".to_string(), pos())),
            Box::new(int(18)),
            pos(),
        ))),
        position: pos(),
    };
    let select = SelectExpr {
        id: NodeId(1),
        source: Box::new(ident("t")),
        where_clause: Some(WhereClause {
            predicate: Box::new(Expression::Lambda(predicate)),
        }),
        order: None,
        position: pos(),
    };

    let prog = program(vec![
        Statement::CreateTable(create),
        Statement::AddColumn(add_column),
        Statement::AddRow(add_row),
        assign("result", Expression::Select(select)),
    ]);
    let ir = compile_ir(&prog);

    assert!(ir.contains("call") && ir.contains("@rt_create_table"));
    assert!(ir.contains("@rt_add_column"));
    assert!(ir.contains("@rt_add_row"));
    assert!(ir.contains("@rt_table_select"));
    assert!(ir.contains("@rt_get_int"));
    assert!(ir.contains("icmp sge"));
    assert!(ir.contains("define i32 @select_pred_lambda_0"));
}

#[test]
fn select_without_where_clause_passes_the_table_through_unchanged() {
    let create = CreateTable {
        binding: Some("t".to_string()),
        name_expr: string("people"),
        position: pos(),
    };
    let select = SelectExpr {
        id: NodeId(0),
        source: Box::new(ident("t")),
        where_clause: None,
        order: None,
        position: pos(),
    };

    let prog = program(vec![
        Statement::CreateTable(create),
        assign("result", Expression::Select(select)),
    ]);
    let ir = compile_ir(&prog);

    assert!(!ir.contains("@rt_table_select"));
}
