use std::fmt;

use serde::Serialize;

use crate::{bootstrap::context::BootContext, runtime::error::RuntimeError};

/// Initialization hook run by the bootstrap driver.
pub type InitFn = fn(&mut BootContext) -> Result<(), RuntimeError>;

/// How a module is linked into the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModuleKind {
    /// Compiled into the runtime binary.
    Builtin,
    /// Linked statically by an embedding application.
    Static,
    /// Loaded from a shared object at startup.
    Dynamic,
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModuleKind::Builtin => "builtin",
            ModuleKind::Static => "static",
            ModuleKind::Dynamic => "dynamic",
        };
        f.pad(label)
    }
}

/// The two bootstrap passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Native wiring: data structures, imports from the higher layer.
    Kernel,
    /// Higher-layer exposure: exported functions and constants.
    Library,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Kernel => f.write_str("kernel"),
            Phase::Library => f.write_str("library"),
        }
    }
}

/// Static description of one runtime subsystem and its init hooks.
///
/// Descriptors are built with `const fn`s so whole registries can live in
/// statics.
#[derive(Debug, Clone, Copy)]
pub struct SubsystemDescriptor {
    pub kind: ModuleKind,
    pub name: &'static str,
    /// Modules that must appear earlier in the registry.
    pub requires: &'static [&'static str],
    pub kernel_init: Option<InitFn>,
    pub library_init: Option<InitFn>,
}

impl SubsystemDescriptor {
    pub const fn new(kind: ModuleKind, name: &'static str) -> Self {
        Self {
            kind,
            name,
            requires: &[],
            kernel_init: None,
            library_init: None,
        }
    }

    pub const fn builtin(name: &'static str) -> Self {
        Self::new(ModuleKind::Builtin, name)
    }

    pub const fn requires(self, requires: &'static [&'static str]) -> Self {
        Self { requires, ..self }
    }

    pub const fn with_kernel(self, hook: InitFn) -> Self {
        Self {
            kernel_init: Some(hook),
            ..self
        }
    }

    pub const fn with_library(self, hook: InitFn) -> Self {
        Self {
            library_init: Some(hook),
            ..self
        }
    }

    pub fn hook(&self, phase: Phase) -> Option<InitFn> {
        match phase {
            Phase::Kernel => self.kernel_init,
            Phase::Library => self.library_init,
        }
    }
}
