use bezel_core::ScopeError;

use crate::stack::ScopeId;

#[derive(Debug, thiserror::Error)]
pub enum StackError {
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error("no scope attached with id {0}")]
    UnknownScope(ScopeId),
    #[error("presentation failed: {0}")]
    Present(String),
}

pub type StackResult<T> = Result<T, StackError>;
