//! Runtime values shared across the native/higher-layer boundary.
//!
//! Everything here is `Send + Sync` so the same types serve both the default
//! build and the `threads` build, where several interpreter threads call into
//! diagnostics at once.
use crate::runtime::{error::RuntimeError, value::Value};

pub mod error;
pub mod globals;
pub mod native_function;
pub mod value;

pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync;
