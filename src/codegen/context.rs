//! Central code generation state: the LLVM builder, the
//! parallel scope stack of `(storage_pointer, ir_type)` pairs, the loop
//! stack `break` targets, and the string-literal cache. Grounded on
//! `why_lib::codegen::{mod, context}`'s `CodegenContext`/`Scope` pair, with
//! `RefCell`-guarded interior mutability since code generation is a
//! single-threaded visitor over `&self`.

use std::cell::RefCell;
use std::collections::HashMap;

use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::types::BasicTypeEnum;
use inkwell::values::{FunctionValue, PointerValue};

/// One lexical frame of LLVM-value bindings. Everything here is a single
/// stack slot — a function declaration allocates a named slot holding its
/// closure struct just like any other binding, rather than getting special
/// treatment in the symbol table.
#[derive(Default)]
struct Frame<'ctx> {
    variables: HashMap<String, (PointerValue<'ctx>, BasicTypeEnum<'ctx>)>,
}

pub struct CodegenContext<'ctx> {
    pub context: &'ctx Context,
    pub module: Module<'ctx>,
    pub builder: Builder<'ctx>,
    scopes: RefCell<Vec<Frame<'ctx>>>,
    /// Entry block of the function currently being built, one per nested
    /// function (closures nest: a lambda's body may itself declare another
    /// lambda). Used by [`CodegenContext::alloca_in_entry`] to satisfy the
    /// entry-block hoisting invariant regardless of builder position.
    entry_blocks: RefCell<Vec<BasicBlock<'ctx>>>,
    /// `break` targets, innermost loop last.
    loop_exits: RefCell<Vec<BasicBlock<'ctx>>>,
    strings: RefCell<HashMap<String, PointerValue<'ctx>>>,
    lambda_counter: RefCell<usize>,
}

impl<'ctx> CodegenContext<'ctx> {
    pub fn new(context: &'ctx Context, module: Module<'ctx>) -> Self {
        CodegenContext {
            context,
            module,
            builder: context.create_builder(),
            scopes: RefCell::new(vec![Frame::default()]),
            entry_blocks: RefCell::new(Vec::new()),
            loop_exits: RefCell::new(Vec::new()),
            strings: RefCell::new(HashMap::new()),
            lambda_counter: RefCell::new(0),
        }
    }

    pub fn enter_scope(&self) {
        self.scopes.borrow_mut().push(Frame::default());
    }

    pub fn exit_scope(&self) {
        self.scopes.borrow_mut().pop();
    }

    pub fn enter_function(&self, entry: BasicBlock<'ctx>) {
        self.entry_blocks.borrow_mut().push(entry);
    }

    pub fn exit_function(&self) {
        self.entry_blocks.borrow_mut().pop();
    }

    pub fn push_loop_exit(&self, exit: BasicBlock<'ctx>) {
        self.loop_exits.borrow_mut().push(exit);
    }

    pub fn pop_loop_exit(&self) {
        self.loop_exits.borrow_mut().pop();
    }

    pub fn current_loop_exit(&self) -> Option<BasicBlock<'ctx>> {
        self.loop_exits.borrow().last().copied()
    }

    /// Binds `name` to `(slot, ty)` in the innermost scope.
    pub fn bind(&self, name: impl Into<String>, slot: PointerValue<'ctx>, ty: BasicTypeEnum<'ctx>) {
        let mut scopes = self.scopes.borrow_mut();
        let frame = scopes.last_mut().expect("scope stack never empties");
        frame.variables.insert(name.into(), (slot, ty));
    }

    /// Walks the scope stack from innermost to outermost, returning the
    /// first binding of `name` found.
    pub fn find(&self, name: &str) -> Option<(PointerValue<'ctx>, BasicTypeEnum<'ctx>)> {
        self.scopes
            .borrow()
            .iter()
            .rev()
            .find_map(|frame| frame.variables.get(name).copied())
    }

    /// Allocates a stack slot of `ty` in the entry block of the function
    /// currently being built, regardless of the builder's current position.
    /// Every stack allocation for a function is hoisted into its entry
    /// block so that a later pass (or a human reading the IR) can assume
    /// a function's `alloca`s are all there, up front. Uses a throwaway
    /// builder positioned before the entry block's first non-alloca
    /// instruction so the main builder's insertion point is left untouched.
    pub fn alloca_in_entry(&self, ty: BasicTypeEnum<'ctx>, name: &str) -> PointerValue<'ctx> {
        let entry = *self
            .entry_blocks
            .borrow()
            .last()
            .expect("alloca requested outside of any function");
        let hoist = self.context.create_builder();
        match entry.get_first_instruction() {
            Some(first) => hoist.position_before(&first),
            None => hoist.position_at_end(entry),
        }
        hoist
            .build_alloca(ty, name)
            .expect("entry-block alloca cannot fail")
    }

    /// Interns a string literal as a global constant, keyed by content, so
    /// that two equal literals produce one global and identical pointers.
    pub fn intern_string(&self, value: &str) -> PointerValue<'ctx> {
        if let Some(&existing) = self.strings.borrow().get(value) {
            return existing;
        }
        let global = self
            .builder
            .build_global_string_ptr(value, "str")
            .expect("global string construction cannot fail");
        let pointer = global.as_pointer_value();
        self.strings.borrow_mut().insert(value.to_string(), pointer);
        pointer
    }

    pub fn next_lambda_name(&self) -> String {
        let mut counter = self.lambda_counter.borrow_mut();
        let name = format!("lambda_{counter}");
        *counter += 1;
        name
    }

    /// True if the builder's current block already ends with a terminator.
    /// Every basic block must end with exactly one terminator; callers use
    /// this to decide whether an implicit fallthrough still needs one.
    pub fn block_is_terminated(&self) -> bool {
        self.builder
            .get_insert_block()
            .and_then(|block| block.get_terminator())
            .is_some()
    }

    pub fn declare_function(&self, name: &str, fn_type: inkwell::types::FunctionType<'ctx>) -> FunctionValue<'ctx> {
        self.module.add_function(name, fn_type, None)
    }

    /// The function currently being built, derived from the builder's
    /// insertion point.
    pub fn current_function(&self) -> FunctionValue<'ctx> {
        self.builder
            .get_insert_block()
            .and_then(|block| block.get_parent())
            .expect("builder must be positioned inside a function")
    }
}
