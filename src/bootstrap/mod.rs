//! Module registration and two-phase startup.
//!
//! Every runtime subsystem is described by a [`SubsystemDescriptor`] listed in
//! a [`ModuleRegistry`]. [`Bootstrap`] walks the registry twice: first running
//! kernel hooks (native data structures, imports from the higher layer), then
//! library hooks (exports to the higher layer). The two passes never
//! interleave, and within a pass registry order is preserved.

pub mod builtin_modules;
pub mod context;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod registry;

pub use context::{BootConfig, BootContext};
pub use descriptor::{InitFn, ModuleKind, Phase, SubsystemDescriptor};
pub use driver::{BootReport, BootState, Bootstrap, HookRecord};
pub use error::BootError;
pub use registry::ModuleRegistry;
