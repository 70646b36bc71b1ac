//! Scope & symbol tree. Scopes form a tree, but the semantic
//! pass only ever has one active path from the root to the scope it is
//! currently visiting, so they are stored in a flat arena (`Vec<ScopeNode>`)
//! indexed by [`ScopeId`] rather than linked through `Rc<RefCell<_>>` as
//! `why_lib::typechecker::scope::Scope` links its frames — the arena gives
//! the same "walk outward by parent pointer" shape without the borrow-
//! checker friction of shared mutable parent links, and mirrors the
//! `DefId`-style handle `plotnik-compiler` uses for the same reason.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::ast::Position;
use crate::types::Type;

/// Stable handle to a [`Symbol`], cheap to copy and hash. Two scopes may hold
/// the same `SymbolId` for the same underlying binding — that sharing is
/// exactly how capture works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    fn from_raw(index: u32) -> Self {
        Self(index)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named binding: its declared type and the source position it was
/// introduced at (kept for diagnostics).
#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub ty: Type,
    pub declared_at: Position,
}

/// Stable handle to a [`ScopeNode`] in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

struct ScopeNode {
    parent: Option<ScopeId>,
    #[allow(dead_code)]
    name: String,
    is_func_boundary: bool,
    locals: HashMap<String, SymbolId>,
    /// Captured symbols accumulated during `resolve`, in first-capture
    /// order. Order matters: it fixes the environment-struct field layout
    /// downstream in codegen.
    captured: IndexMap<String, SymbolId>,
}

/// The scope tree plus the flat table of symbols it hands out `SymbolId`s
/// into. One `SymbolTable` lives for the whole semantic pass.
pub struct SymbolTable {
    scopes: Vec<ScopeNode>,
    symbols: Vec<Symbol>,
    root: ScopeId,
}

impl Default for SymbolTable {
    fn default() -> Self {
        let root = ScopeNode {
            parent: None,
            name: "<global>".to_string(),
            is_func_boundary: false,
            locals: HashMap::new(),
            captured: IndexMap::new(),
        };
        SymbolTable {
            scopes: vec![root],
            symbols: Vec::new(),
            root: ScopeId(0),
        }
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> ScopeId {
        self.root
    }

    /// Pushes a child scope onto the arena and returns its handle. The
    /// caller is responsible for remembering the parent scope to return to
    /// (there is no `exit_scope` mutation here — scopes are never removed,
    /// they simply stop being visited, which keeps captured-variable
    /// bookkeeping intact after the fact for codegen/diagnostics).
    pub fn enter_scope(&mut self, parent: ScopeId, name: impl Into<String>, is_func_boundary: bool) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(ScopeNode {
            parent: Some(parent),
            name: name.into(),
            is_func_boundary,
            locals: HashMap::new(),
            captured: IndexMap::new(),
        });
        id
    }

    /// Installs `name` into `scope`'s local bindings, returning the new
    /// symbol's id. The parser/earlier passes are assumed to forbid
    /// redeclaration at the same level; this simply overwrites on a second
    /// call, matching "last write wins" for the one legitimate case that
    /// reaches it: re-typing a name on reassignment.
    pub fn define(&mut self, scope: ScopeId, name: impl Into<String>, ty: Type, declared_at: Position) -> SymbolId {
        let name = name.into();
        let id = SymbolId::from_raw(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name: name.clone(),
            ty,
            declared_at,
        });
        self.scopes[scope.index()].locals.insert(name, id);
        id
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// Updates an already-resolved symbol's type in place, so a reassignment
    /// with a different inferred type retypes the binding rather than
    /// erroring.
    pub fn retype(&mut self, id: SymbolId, ty: Type) {
        self.symbols[id.index()].ty = ty;
    }

    /// Walks outward from `scope` looking for `name`; on the way back in,
    /// any function-boundary scope crossed gets `name` recorded in its
    /// `captured` map. Returns the resolved symbol, or `None` if no scope
    /// on the path to the root defines `name`.
    pub fn resolve(&mut self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        if let Some(&id) = self.scopes[scope.index()].locals.get(name) {
            return Some(id);
        }

        let parent = self.scopes[scope.index()].parent?;
        let found = self.resolve(parent, name)?;

        if self.scopes[scope.index()].is_func_boundary {
            self.scopes[scope.index()]
                .captured
                .entry(name.to_string())
                .or_insert(found);
        }

        Some(found)
    }

    /// The capture set accumulated at `scope` so far. Only meaningful for
    /// function-boundary scopes; non-boundary scopes never populate theirs —
    /// intermediate non-function blocks do not record captures, only
    /// boundaries do.
    pub fn captures(&self, scope: ScopeId) -> &IndexMap<String, SymbolId> {
        &self.scopes[scope.index()].captured
    }

    pub fn is_func_boundary(&self, scope: ScopeId) -> bool {
        self.scopes[scope.index()].is_func_boundary
    }

    /// True if `scope` (or any ancestor) is a function boundary — used by
    /// the `return`-outside-function check.
    pub fn has_enclosing_function(&self, mut scope: ScopeId) -> bool {
        loop {
            if self.scopes[scope.index()].is_func_boundary {
                return true;
            }
            match self.scopes[scope.index()].parent {
                Some(parent) => scope = parent,
                None => return false,
            }
        }
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("scope_count", &self.scopes.len())
            .field("symbol_count", &self.symbols.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position { line: 1, column: 1 }
    }

    #[test]
    fn resolve_finds_local_without_capture() {
        let mut table = SymbolTable::new();
        let root = table.root();
        table.define(root, "x", Type::Int, pos());

        let resolved = table.resolve(root, "x").unwrap();
        assert_eq!(table.symbol(resolved).name, "x");
        assert!(table.captures(root).is_empty());
    }

    #[test]
    fn capture_recorded_only_at_function_boundary() {
        let mut table = SymbolTable::new();
        let root = table.root();
        table.define(root, "x", Type::Int, pos());

        let block = table.enter_scope(root, "block", false);
        let func = table.enter_scope(block, "func", true);

        table.resolve(func, "x").unwrap();

        assert!(table.captures(block).is_empty());
        assert!(table.captures(func).contains_key("x"));
    }

    #[test]
    fn capture_propagates_through_nested_boundaries() {
        let mut table = SymbolTable::new();
        let root = table.root();
        table.define(root, "x", Type::Int, pos());

        let outer_func = table.enter_scope(root, "outer", true);
        let inner_func = table.enter_scope(outer_func, "inner", true);

        table.resolve(inner_func, "x").unwrap();

        assert!(table.captures(outer_func).contains_key("x"));
        assert!(table.captures(inner_func).contains_key("x"));
    }

    #[test]
    fn missing_name_resolves_to_none() {
        let mut table = SymbolTable::new();
        let root = table.root();
        assert!(table.resolve(root, "nope").is_none());
    }

    #[test]
    fn return_outside_function_is_detected_via_ancestor_walk() {
        let mut table = SymbolTable::new();
        let root = table.root();
        let top_level_block = table.enter_scope(root, "block", false);
        assert!(!table.has_enclosing_function(top_level_block));

        let func = table.enter_scope(root, "func", true);
        let nested_block = table.enter_scope(func, "block", false);
        assert!(table.has_enclosing_function(nested_block));
    }
}
