use crate::runtime::{globals::GlobalTable, native_function::NativeFunction};

/// Higher-layer name of the suppression policy: `(selectors, level) -> Bool`.
pub const DECISION_NAME: &str = "info_decision";
/// Higher-layer name of the fallback emitter: `(class, level, args)`.
pub const DEFAULT_HANDLER_NAME: &str = "default_info_handler";
/// Higher-layer name of the class-list recognizer: `(value) -> Bool`.
pub const CLASS_LIST_PREDICATE_NAME: &str = "is_info_class_list";

/// The three behaviors info dispatch delegates to the higher layer.
///
/// Each binding is either resolved or not. Bindings are resolved once, when
/// the info module's kernel hook runs, and never change afterwards.
#[derive(Debug, Clone, Default)]
pub struct InfoBindings {
    decision: Option<NativeFunction>,
    default_handler: Option<NativeFunction>,
    is_class_list: Option<NativeFunction>,
}

impl InfoBindings {
    pub fn new(
        decision: NativeFunction,
        default_handler: NativeFunction,
        is_class_list: NativeFunction,
    ) -> Self {
        Self {
            decision: Some(decision),
            default_handler: Some(default_handler),
            is_class_list: Some(is_class_list),
        }
    }

    /// Bindings with nothing resolved.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Resolves each binding by name from `globals`.
    ///
    /// Names the higher layer has not defined yet stay unresolved.
    pub fn import(globals: &GlobalTable) -> Self {
        Self {
            decision: import_function(globals, DECISION_NAME),
            default_handler: import_function(globals, DEFAULT_HANDLER_NAME),
            is_class_list: import_function(globals, CLASS_LIST_PREDICATE_NAME),
        }
    }

    pub fn with_decision(mut self, decision: NativeFunction) -> Self {
        self.decision = Some(decision);
        self
    }

    pub fn with_default_handler(mut self, handler: NativeFunction) -> Self {
        self.default_handler = Some(handler);
        self
    }

    pub fn with_class_list_predicate(mut self, predicate: NativeFunction) -> Self {
        self.is_class_list = Some(predicate);
        self
    }

    pub fn decision(&self) -> Option<&NativeFunction> {
        self.decision.as_ref()
    }

    pub fn default_handler(&self) -> Option<&NativeFunction> {
        self.default_handler.as_ref()
    }

    pub fn class_list_predicate(&self) -> Option<&NativeFunction> {
        self.is_class_list.as_ref()
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.decision.is_some() && self.default_handler.is_some() && self.is_class_list.is_some()
    }
}

fn import_function(globals: &GlobalTable, name: &'static str) -> Option<NativeFunction> {
    let function = globals.function(name);
    if function.is_none() {
        log::warn!("info binding '{}' is not defined yet; leaving it unresolved", name);
    }
    function
}
