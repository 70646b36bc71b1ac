//! The semantic pass: a single tree walk that populates the scope/symbol
//! tree, infers expression types, accumulates errors without aborting, and
//! records each function/lambda's captured-variable set.
//!
//! Grounded on `why_lib::typechecker::{context, mod}` for the walk-and-
//! accumulate shape (one context object driving the whole pass) and on
//! `original_source/analyzer/semantic.py` for the exact per-construct
//! contracts and the `enter_scope`/parameter-binding debug tracing.

use std::collections::HashMap;

use log::debug;

use crate::ast::*;
use crate::types::Type;

use super::error::SemanticError;
use super::scope::{ScopeId, SymbolTable};

/// Every built-in pre-populated in the global scope.
/// `create_table`/`add_column`/`add_row` also exist as dedicated statement
/// forms in this parse tree, but the invariant registers all five names
/// regardless — `write`/`print` are the only two actually reached through
/// ordinary identifier resolution (as call targets).
const BUILTINS: &[&str] = &["create_table", "add_column", "add_row", "write", "print"];

/// Output of the semantic pass: capture sets keyed by the declaring node,
/// and the accumulated error list. Everything else the pass computes
/// (resolved symbols, inferred expression types) is transient — codegen
/// re-derives what it needs directly from the LLVM values it already holds
/// (see `codegen::expressions::call`'s print/write dispatch).
#[derive(Debug, Default)]
pub struct Annotations {
    pub captures: HashMap<NodeId, CapturedVars>,
    pub errors: Vec<SemanticError>,
}

struct Analyzer {
    table: SymbolTable,
    annotations: Annotations,
    /// Stack of loop-exit markers is codegen's concern; semantic analysis
    /// doesn't need to validate `break` placement — an unresolved `break`
    /// is an internal-compiler-error kind, not a semantic error a user
    /// program can trigger.
    scope_path: Vec<ScopeId>,
}

impl Analyzer {
    fn new() -> Self {
        let mut table = SymbolTable::new();
        let root = table.root();
        for name in BUILTINS {
            table.define(root, *name, Type::Function, Position::default());
        }
        Analyzer {
            table,
            annotations: Annotations::default(),
            scope_path: vec![root],
        }
    }

    fn current(&self) -> ScopeId {
        *self.scope_path.last().expect("scope stack never empties")
    }

    fn enter(&mut self, name: &str, is_func_boundary: bool) -> ScopeId {
        let parent = self.current();
        let child = self.table.enter_scope(parent, name, is_func_boundary);
        debug!("enter_scope {name} (boundary={is_func_boundary})");
        self.scope_path.push(child);
        child
    }

    fn exit(&mut self) {
        self.scope_path.pop();
    }

    fn declared_type(type_name: &Option<String>) -> Type {
        match type_name.as_deref() {
            Some("int") => Type::Int,
            Some("decimal") => Type::Decimal,
            Some("string") => Type::String,
            Some("bool") => Type::Bool,
            Some("table") => Type::Table,
            Some("row") => Type::Row,
            _ => Type::Any,
        }
    }

    fn visit_program(&mut self, program: &Program) {
        for statement in &program.statements {
            self.visit_statement(statement);
        }
    }

    fn visit_block(&mut self, block: &Block) {
        self.enter("block", false);
        for statement in &block.statements {
            self.visit_statement(statement);
        }
        self.exit();
    }

    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::FuncDecl(decl) => self.visit_func_decl(decl),
            Statement::Block(block) => self.visit_block(block),
            Statement::If(stmt) => self.visit_if(stmt),
            Statement::For(stmt) => self.visit_for(stmt),
            Statement::Switch(stmt) => self.visit_switch(stmt),
            Statement::Return(expr, position) => self.visit_return(expr.as_ref(), *position),
            Statement::Break(_) => {}
            Statement::Assignment(assignment) => self.visit_assignment(assignment),
            Statement::CreateTable(stmt) => self.visit_create_table(stmt),
            Statement::AddColumn(stmt) => {
                self.visit_expr(&stmt.table);
                self.visit_expr(&stmt.name);
            }
            Statement::AddRow(stmt) => {
                self.visit_expr(&stmt.table);
            }
            Statement::Expression(expr) => {
                self.visit_expr(expr);
            }
        }
    }

    fn visit_func_decl(&mut self, decl: &FuncDecl) {
        let current = self.current();
        self.table.define(current, &decl.name, Type::Function, decl.position);

        self.enter(&decl.name, true);
        for param in &decl.params {
            let ty = Self::declared_type(&param.type_name);
            self.table.define(self.current(), &param.name, ty, param.position);
            debug!("bind parameter {} : {:?}", param.name, ty);
        }
        for statement in &decl.body.statements {
            self.visit_statement(statement);
        }
        let captures = self.table.captures(self.current()).clone();
        self.annotations.captures.insert(decl.id, captures);
        self.exit();
    }

    fn visit_lambda(&mut self, lambda: &Lambda) -> Type {
        self.enter("lambda", true);
        for param in &lambda.params {
            let ty = Self::declared_type(&param.type_name);
            self.table.define(self.current(), &param.name, ty, param.position);
            debug!("bind parameter {} : {:?}", param.name, ty);
        }
        match &lambda.body {
            LambdaBody::Block(block) => {
                for statement in &block.statements {
                    self.visit_statement(statement);
                }
            }
            LambdaBody::Expression(expr) => {
                self.visit_expr(expr);
            }
        }
        let captures = self.table.captures(self.current()).clone();
        self.annotations.captures.insert(lambda.id, captures);
        self.exit();
        Type::Function
    }

    fn visit_if(&mut self, stmt: &IfStmt) {
        for condition in &stmt.conditions {
            self.visit_expr(condition);
        }
        for branch in &stmt.branches {
            self.visit_block(branch);
        }
        if let Some(else_branch) = &stmt.else_branch {
            self.visit_block(else_branch);
        }
    }

    fn visit_for(&mut self, stmt: &ForStmt) {
        self.visit_expr(&stmt.low);
        self.visit_expr(&stmt.high);
        self.enter("for", false);
        self.table
            .define(self.current(), &stmt.iterator, Type::Int, stmt.position);
        for statement in &stmt.body.statements {
            self.visit_statement(statement);
        }
        self.exit();
    }

    fn visit_switch(&mut self, stmt: &SwitchStmt) {
        if let Some(scrutinee) = &stmt.scrutinee {
            self.visit_expr(scrutinee);
        }
        for case in &stmt.cases {
            for label in &case.labels {
                match label {
                    CaseLabel::Value(expr) => {
                        self.visit_expr(expr);
                    }
                    CaseLabel::Range(low, high) => {
                        self.visit_expr(low);
                        self.visit_expr(high);
                    }
                }
            }
            for statement in &case.body {
                self.visit_statement(statement);
            }
        }
        if let Some(default) = &stmt.default {
            for statement in default {
                self.visit_statement(statement);
            }
        }
    }

    fn visit_return(&mut self, expr: Option<&Expression>, position: Position) {
        if !self.table.has_enclosing_function(self.current()) {
            self.annotations
                .errors
                .push(SemanticError::return_outside_function(position));
        }
        if let Some(expr) = expr {
            self.visit_expr(expr);
        }
    }

    fn visit_assignment(&mut self, assignment: &Assignment) {
        let ty = self.visit_expr(&assignment.value);
        let current = self.current();
        match self.table.resolve(current, &assignment.name) {
            Some(id) => self.table.retype(id, ty),
            None => {
                self.table.define(current, &assignment.name, ty, assignment.position);
            }
        }
    }

    fn visit_create_table(&mut self, stmt: &CreateTable) {
        self.visit_expr(&stmt.name_expr);
        if let Some(binding) = &stmt.binding {
            let current = self.current();
            self.table.define(current, binding, Type::Table, stmt.position);
        }
    }

    /// Infers `expr`'s type, recording errors along the way. Returns
    /// `Type::Any` wherever inference is incomplete rather than treating
    /// incompleteness itself as an error — the lattice is deliberately
    /// permissive.
    fn visit_expr(&mut self, expr: &Expression) -> Type {
        match expr {
            Expression::Literal(literal, _) => match literal {
                Literal::Int(_) => Type::Int,
                Literal::Decimal(_) => Type::Decimal,
                Literal::Str(_) => Type::String,
                Literal::Bool(_) => Type::Bool,
            },
            Expression::Identifier(name, position) => {
                let current = self.current();
                match self.table.resolve(current, name) {
                    Some(id) => self.table.symbol(id).ty,
                    None => {
                        self.annotations
                            .errors
                            .push(SemanticError::undefined_variable(name.clone(), *position));
                        Type::Any
                    }
                }
            }
            Expression::Add(lhs, rhs, _) => {
                let lhs_ty = self.visit_expr(lhs);
                let rhs_ty = self.visit_expr(rhs);
                if lhs_ty == Type::String || rhs_ty == Type::String {
                    Type::String
                } else {
                    Type::Int
                }
            }
            Expression::Compare(_, lhs, rhs, _) => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
                Type::Bool
            }
            Expression::Logical(_, lhs, rhs, _) => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
                Type::Bool
            }
            Expression::Not(inner, _) => {
                self.visit_expr(inner);
                Type::Bool
            }
            Expression::Call(callee, args, _) => {
                self.visit_expr(callee);
                for arg in args {
                    self.visit_expr(arg);
                }
                Type::Any
            }
            Expression::Member(base, _, _) => {
                self.visit_expr(base);
                Type::Any
            }
            Expression::Index(base, index, _) => {
                self.visit_expr(base);
                self.visit_expr(index);
                Type::Any
            }
            Expression::Lambda(lambda) => self.visit_lambda(lambda),
            Expression::Select(select) => self.visit_select(select),
        }
    }

    fn visit_select(&mut self, select: &SelectExpr) -> Type {
        let source_ty = self.visit_expr(&select.source);
        if source_ty != Type::Table && source_ty != Type::Any {
            self.annotations
                .errors
                .push(SemanticError::selection_source_not_table(select.position));
        }
        if let Some(where_clause) = &select.where_clause {
            self.visit_expr(&where_clause.predicate);
        }
        Type::Table
    }
}

/// Runs the full semantic pass over `program`, returning the capture/error
/// annotations codegen and the driver consume.
pub fn analyze(program: &Program) -> Annotations {
    let mut analyzer = Analyzer::new();
    analyzer.visit_program(program);
    analyzer.annotations
}
