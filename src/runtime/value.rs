use std::{fmt, sync::Arc};

use crate::{info::InfoClass, runtime::native_function::NativeFunction};

/// Runtime value exchanged between native subsystems and the higher layer.
///
/// ## Sharing Model
///
/// Heap-backed variants use `Arc` so values can cross interpreter threads in
/// the `threads` build. Cloning a value is O(1) for every variant.
///
/// Values are semantically immutable. The only mutable state reachable from a
/// `Value` lives behind an [`InfoClass`] handle, whose storage defines its own
/// atomicity guarantees.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// UTF-8 string value.
    String(Arc<str>),
    /// Absence of value.
    None,
    /// Ordered collection of values.
    Array(Arc<Vec<Value>>),
    /// Native or higher-layer callable.
    Function(NativeFunction),
    /// Leveled diagnostic category.
    InfoClass(InfoClass),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::None => write!(f, "None"),
            Value::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Function(func) => write!(f, "<function {}>", func.name()),
            Value::InfoClass(class) => write!(f, "{}", class.name()),
        }
    }
}

impl Value {
    /// Returns the canonical runtime type label used in diagnostics.
    ///
    /// These labels are user-visible and are expected to remain stable.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Int",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Bool",
            Value::String(_) => "String",
            Value::None => "None",
            Value::Array(_) => "Array",
            Value::Function(_) => "Function",
            Value::InfoClass(_) => "InfoClass",
        }
    }

    pub fn string(text: &str) -> Self {
        Value::String(Arc::from(text))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the info class a selector stands for: the class itself, or the
    /// first element of a class list.
    pub fn representative_class(&self) -> Option<&InfoClass> {
        match self {
            Value::InfoClass(class) => Some(class),
            Value::Array(items) => match items.first() {
                Some(Value::InfoClass(class)) => Some(class),
                _ => None,
            },
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<InfoClass> for Value {
    fn from(value: InfoClass) -> Self {
        Value::InfoClass(value)
    }
}

impl From<NativeFunction> for Value {
    fn from(value: NativeFunction) -> Self {
        Value::Function(value)
    }
}
