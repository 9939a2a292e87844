use thiserror::Error;

/// Failure raised by native code or by a higher-layer callable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("{0}")]
    Raised(String),
    #[error("'{name}' is not bound")]
    Unbound { name: &'static str },
    #[error("{context} expected {expected}, got {got}")]
    TypeMismatch {
        context: &'static str,
        expected: &'static str,
        got: &'static str,
    },
    #[error("wrong number of arguments to {name}: expected {expected}, got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("cannot redefine constant '{0}'")]
    ConstantRedefined(String),
    #[error("info record has {got} fields, expected {expected}")]
    RecordLength { expected: usize, got: usize },
    #[error("info bindings are already installed")]
    BindingsInstalled,
}

impl RuntimeError {
    pub fn raised(message: impl Into<String>) -> Self {
        RuntimeError::Raised(message.into())
    }
}
