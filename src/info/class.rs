use std::{fmt, sync::Arc};

use crate::{
    info::{
        schema::InfoField,
        storage::{InfoStorage, StorageKind},
    },
    runtime::{error::RuntimeError, native_function::NativeFunction, value::Value},
};

/// Handle to a leveled diagnostic category.
///
/// Clones share storage, so a level change made through one handle is seen by
/// every other. Equality is identity: two classes with the same name declared
/// separately are different classes.
#[derive(Clone)]
pub struct InfoClass {
    storage: Arc<dyn InfoStorage>,
}

impl InfoClass {
    /// Creates a class at level 0 with no handler and no output target.
    pub fn new(ordinal: usize, name: &str, kind: StorageKind) -> Self {
        let fields = [
            Value::Integer(ordinal as i64),
            Value::Integer(0),
            Value::string(name),
            Value::None,
            Value::None,
        ];
        Self {
            storage: kind.build(fields),
        }
    }

    /// Wraps a custom storage implementation.
    pub fn with_storage(storage: Arc<dyn InfoStorage>) -> Self {
        Self { storage }
    }

    /// Builds a class from a positional record laid out with the exported
    /// field positions (`record[position - 1]`).
    pub fn from_record(record: &[Value], kind: StorageKind) -> Result<Self, RuntimeError> {
        if record.len() != InfoField::COUNT {
            return Err(RuntimeError::RecordLength {
                expected: InfoField::COUNT,
                got: record.len(),
            });
        }

        let ordinal = &record[InfoField::Ordinal.index()];
        match ordinal {
            Value::Integer(n) if *n >= 0 => {}
            other => {
                return Err(RuntimeError::TypeMismatch {
                    context: "info record ordinal",
                    expected: "non-negative Int",
                    got: other.type_name(),
                });
            }
        }

        let name = &record[InfoField::ClassName.index()];
        if !matches!(name, Value::String(_)) {
            return Err(RuntimeError::TypeMismatch {
                context: "info record class name",
                expected: "String",
                got: name.type_name(),
            });
        }

        let handler = &record[InfoField::Handler.index()];
        if !matches!(handler, Value::Function(_) | Value::None) {
            return Err(RuntimeError::TypeMismatch {
                context: "info record handler",
                expected: "Function or None",
                got: handler.type_name(),
            });
        }

        let fields: [Value; InfoField::COUNT] = std::array::from_fn(|i| record[i].clone());
        Ok(Self {
            storage: kind.build(fields),
        })
    }

    /// Copies the fields back out in record layout.
    pub fn to_record(&self) -> Vec<Value> {
        InfoField::ALL
            .iter()
            .map(|&field| self.storage.load(field))
            .collect()
    }

    pub fn ordinal(&self) -> usize {
        self.storage
            .load(InfoField::Ordinal)
            .as_int()
            .map(|n| n as usize)
            .unwrap_or(0)
    }

    pub fn name(&self) -> Arc<str> {
        match self.storage.load(InfoField::ClassName) {
            Value::String(name) => name,
            _ => Arc::from(""),
        }
    }

    pub fn current_level(&self) -> Value {
        self.storage.load(InfoField::CurrentLevel)
    }

    /// Fast-path read: the current level if it is an integer.
    #[inline]
    pub fn level_as_int(&self) -> Option<i64> {
        self.storage.level_as_int()
    }

    pub fn set_level(&self, level: Value) {
        self.storage.store(InfoField::CurrentLevel, level);
    }

    pub fn handler(&self) -> Option<NativeFunction> {
        match self.storage.load(InfoField::Handler) {
            Value::Function(handler) => Some(handler),
            _ => None,
        }
    }

    pub fn set_handler(&self, handler: Option<NativeFunction>) {
        let value = handler.map(Value::Function).unwrap_or(Value::None);
        self.storage.store(InfoField::Handler, value);
    }

    pub fn output(&self) -> Value {
        self.storage.load(InfoField::Output)
    }

    pub fn set_output(&self, output: Value) {
        self.storage.store(InfoField::Output, output);
    }
}

impl PartialEq for InfoClass {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }
}

impl fmt::Debug for InfoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoClass({}, #{})", self.name(), self.ordinal())
    }
}
