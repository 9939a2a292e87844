use thiserror::Error;

use crate::{
    bootstrap::{descriptor::Phase, driver::BootState},
    runtime::error::RuntimeError,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BootError {
    #[error("{phase} initialization of module '{module}' failed")]
    HookFailed {
        phase: Phase,
        module: &'static str,
        source: RuntimeError,
    },
    #[error("{phase} phase cannot run: bootstrap is {state}")]
    PhaseOrder { phase: Phase, state: BootState },
    #[error("module '{0}' is registered more than once")]
    DuplicateModule(&'static str),
    #[error("module '{module}' requires '{requires}', which is not registered")]
    MissingDependency {
        module: &'static str,
        requires: &'static str,
    },
    #[error("module '{module}' requires '{requires}', which is registered after it")]
    DependencyOrder {
        module: &'static str,
        requires: &'static str,
    },
}

impl BootError {
    /// Name of the module whose hook failed, if that is what happened.
    pub fn failed_module(&self) -> Option<&'static str> {
        match self {
            BootError::HookFailed { module, .. } => Some(*module),
            _ => None,
        }
    }
}
