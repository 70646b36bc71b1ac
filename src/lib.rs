//! Semantic analysis and LLVM code generation core for the RelTable DSL.
//!
//! The pipeline is: a typed parse tree ([`ast::Program`]) goes into
//! [`analyze::analyze`], which resolves scopes, discovers closure captures,
//! and infers types; the resulting [`analyze::Annotations`] and the tree
//! together go into [`codegen::generate`], which lowers everything to
//! textual LLVM IR against the fixed [`runtime`] ABI. [`driver`] wires the
//! two passes together and is what the `reltablec` binary calls.

pub mod analyze;
pub mod ast;
pub mod codegen;
pub mod driver;
pub mod runtime;
pub mod types;
