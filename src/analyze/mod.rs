pub mod error;
pub mod scope;
pub mod semantic;

pub use error::SemanticError;
pub use scope::{ScopeId, SymbolId, SymbolTable};
pub use semantic::{analyze, Annotations};
