use std::sync::Arc;

use indexmap::IndexMap;

use crate::runtime::{error::RuntimeError, native_function::NativeFunction, value::Value};

#[derive(Debug, Clone)]
struct Global {
    value: Value,
    constant: bool,
}

/// Name-keyed global variables shared by native subsystems and the higher layer.
///
/// This is the rendezvous point for name-based imports (native code looking up
/// higher-layer functions) and exports (native code publishing constants).
/// Iteration follows definition order.
#[derive(Debug, Clone, Default)]
pub struct GlobalTable {
    globals: IndexMap<Arc<str>, Global>,
}

impl GlobalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any previous non-constant binding.
    pub fn define(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if self.is_constant(name) {
            return Err(RuntimeError::ConstantRedefined(name.to_string()));
        }
        self.globals.insert(
            Arc::from(name),
            Global {
                value,
                constant: false,
            },
        );
        Ok(())
    }

    /// Binds `name` to a native function under its own name.
    pub fn define_function(&mut self, function: NativeFunction) -> Result<(), RuntimeError> {
        let name = function.name().to_string();
        self.define(&name, Value::Function(function))
    }

    /// Binds `name` as a read-only constant.
    ///
    /// Constants are written once; any later definition of the same name fails.
    pub fn define_constant(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if self.globals.contains_key(name) {
            return Err(RuntimeError::ConstantRedefined(name.to_string()));
        }
        self.globals.insert(
            Arc::from(name),
            Global {
                value,
                constant: true,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.globals.get(name).map(|global| &global.value)
    }

    /// Looks up `name` and returns it only if it is bound to a function.
    pub fn function(&self, name: &str) -> Option<NativeFunction> {
        match self.get(name) {
            Some(Value::Function(function)) => Some(function.clone()),
            _ => None,
        }
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.globals
            .get(name)
            .map(|global| global.constant)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.globals
            .iter()
            .map(|(name, global)| (name.as_ref(), &global.value))
    }
}
