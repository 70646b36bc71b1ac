//! Semantic error kinds. Hand-written `Display`/`Error` impls, matching
//! `why_lib::typechecker::error`'s style rather than pulling in `thiserror`
//! for three variants.

use std::fmt;

use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    UndefinedVariable { name: String },
    ReturnOutsideFunction,
    SelectionSourceNotTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub position: Position,
}

impl SemanticError {
    pub fn undefined_variable(name: impl Into<String>, position: Position) -> Self {
        SemanticError {
            kind: SemanticErrorKind::UndefinedVariable { name: name.into() },
            position,
        }
    }

    pub fn return_outside_function(position: Position) -> Self {
        SemanticError {
            kind: SemanticErrorKind::ReturnOutsideFunction,
            position,
        }
    }

    pub fn selection_source_not_table(position: Position) -> Self {
        SemanticError {
            kind: SemanticErrorKind::SelectionSourceNotTable,
            position,
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match &self.kind {
            SemanticErrorKind::UndefinedVariable { name } => {
                format!("Undefined variable '{name}'")
            }
            SemanticErrorKind::ReturnOutsideFunction => {
                "'return' statement outside of function".to_string()
            }
            SemanticErrorKind::SelectionSourceNotTable => {
                "Selection source must be a table".to_string()
            }
        };
        write!(
            f,
            "{}:{}: {}",
            self.position.line, self.position.column, message
        )
    }
}

impl std::error::Error for SemanticError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_variable_message_matches_canonical_form() {
        let err = SemanticError::undefined_variable("x", Position { line: 3, column: 5 });
        assert_eq!(err.to_string(), "3:5: Undefined variable 'x'");
    }

    #[test]
    fn return_outside_function_message_matches_canonical_form() {
        let err = SemanticError::return_outside_function(Position { line: 1, column: 1 });
        assert_eq!(err.to_string(), "1:1: 'return' statement outside of function");
    }
}
