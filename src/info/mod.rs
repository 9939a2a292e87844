//! Leveled diagnostics ("info" messages).
//!
//! Runtime code files messages under one or more [`InfoClass`]es and a
//! verbosity level. Whether a message is shown, and how it is printed, is
//! decided by the higher layer through three bindings ([`InfoBindings`]) that
//! the info module's kernel hook resolves by name. Native code only keeps the
//! cheap "obviously suppressed" check for itself.

pub mod bindings;
pub mod class;
pub mod dispatch;
pub mod module;
pub mod schema;
pub mod storage;

pub use bindings::{
    CLASS_LIST_PREDICATE_NAME, DECISION_NAME, DEFAULT_HANDLER_NAME, InfoBindings,
};
pub use class::InfoClass;
pub use dispatch::InfoDispatch;
pub use module::INFO_MODULE;
pub use schema::{FieldLayout, INFO_FIELD_COUNT_EXPORT, InfoField, InfoSchema};
pub use storage::{InfoStorage, KeyedStorage, RecordStorage, StorageKind};
