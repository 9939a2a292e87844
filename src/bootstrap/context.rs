use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    info::{InfoBindings, InfoClass, InfoDispatch, StorageKind},
    runtime::{error::RuntimeError, globals::GlobalTable},
};

/// Build-independent startup options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BootConfig {
    /// Storage used for info classes declared through the context.
    pub storage: StorageKind,
}

/// Process state that subsystem hooks read and populate during startup.
///
/// The context owns what would otherwise be process-wide singletons: the
/// global table, the resolved info bindings and the declared info classes.
#[derive(Debug)]
pub struct BootContext {
    config: BootConfig,
    globals: GlobalTable,
    info_bindings: Option<Arc<InfoBindings>>,
    info_classes: IndexMap<Arc<str>, InfoClass>,
}

impl BootContext {
    pub fn new(config: BootConfig) -> Self {
        Self::with_globals(config, GlobalTable::new())
    }

    /// Starts from globals the host has already populated, typically with the
    /// higher-layer functions that kernel hooks import.
    pub fn with_globals(config: BootConfig, globals: GlobalTable) -> Self {
        Self {
            config,
            globals,
            info_bindings: None,
            info_classes: IndexMap::new(),
        }
    }

    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    pub fn globals(&self) -> &GlobalTable {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut GlobalTable {
        &mut self.globals
    }

    /// Installs the info bindings. Only the first installation is accepted.
    pub fn install_info_bindings(&mut self, bindings: InfoBindings) -> Result<(), RuntimeError> {
        if self.info_bindings.is_some() {
            return Err(RuntimeError::BindingsInstalled);
        }
        log::debug!(
            "info bindings installed (fully resolved: {})",
            bindings.is_fully_resolved()
        );
        self.info_bindings = Some(Arc::new(bindings));
        Ok(())
    }

    pub fn info_bindings(&self) -> Option<&Arc<InfoBindings>> {
        self.info_bindings.as_ref()
    }

    /// Dispatch handle over the installed bindings, once the info module's
    /// kernel hook has run.
    pub fn info_dispatch(&self) -> Option<InfoDispatch> {
        self.info_bindings.clone().map(InfoDispatch::new)
    }

    /// Returns the class declared under `name`, declaring it first if needed.
    ///
    /// New classes get the next ordinal, level 0, no handler, and the
    /// configured storage.
    pub fn declare_info_class(&mut self, name: &str) -> InfoClass {
        if let Some(class) = self.info_classes.get(name) {
            return class.clone();
        }
        let ordinal = self.info_classes.len() + 1;
        let class = InfoClass::new(ordinal, name, self.config.storage);
        self.info_classes.insert(Arc::from(name), class.clone());
        class
    }

    pub fn info_class(&self, name: &str) -> Option<&InfoClass> {
        self.info_classes.get(name)
    }

    pub fn info_classes(&self) -> impl Iterator<Item = &InfoClass> {
        self.info_classes.values()
    }
}
