use crate::bootstrap::{builtin_modules, descriptor::SubsystemDescriptor, error::BootError};

/// Ordered list of subsystem descriptors.
///
/// Order is the dependency order: every hook may rely on the same-phase hooks
/// of earlier entries. [`ModuleRegistry::validate`] re-checks the declared
/// `requires` edges after any reordering.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<SubsystemDescriptor>,
}

impl ModuleRegistry {
    /// The runtime's own modules for this build configuration.
    pub fn builtin() -> Self {
        let mut modules = Vec::with_capacity(builtin_modules::CORE_MODULES.len() + 4);
        // Traversal is needed by other modules' kernel hooks in the threaded build.
        #[cfg(feature = "threads")]
        modules.extend_from_slice(builtin_modules::THREAD_PRELUDE_MODULES);
        modules.extend_from_slice(builtin_modules::CORE_MODULES);
        #[cfg(feature = "threads")]
        modules.extend_from_slice(builtin_modules::THREAD_MODULES);
        Self { modules }
    }

    pub fn from_descriptors(modules: Vec<SubsystemDescriptor>) -> Self {
        Self { modules }
    }

    pub fn push(&mut self, module: SubsystemDescriptor) {
        self.modules.push(module);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubsystemDescriptor> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.modules.iter().position(|module| module.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&SubsystemDescriptor> {
        self.modules.iter().find(|module| module.name == name)
    }

    /// Checks names are unique and every `requires` entry comes earlier.
    pub fn validate(&self) -> Result<(), BootError> {
        for (index, module) in self.modules.iter().enumerate() {
            if self.modules[..index]
                .iter()
                .any(|earlier| earlier.name == module.name)
            {
                return Err(BootError::DuplicateModule(module.name));
            }

            for &requires in module.requires {
                match self.position(requires) {
                    Some(position) if position < index => {}
                    Some(_) => {
                        return Err(BootError::DependencyOrder {
                            module: module.name,
                            requires,
                        });
                    }
                    None => {
                        return Err(BootError::MissingDependency {
                            module: module.name,
                            requires,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ModuleRegistry {
    type Item = &'a SubsystemDescriptor;
    type IntoIter = std::slice::Iter<'a, SubsystemDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}
