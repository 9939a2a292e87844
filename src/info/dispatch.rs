use std::sync::Arc;

use crate::{
    info::bindings::{DECISION_NAME, DEFAULT_HANDLER_NAME, InfoBindings},
    runtime::{error::RuntimeError, value::Value},
};

/// Entry points the rest of the runtime uses to emit info messages.
///
/// Callers guard message construction with [`InfoDispatch::check_level`] and
/// only then call [`InfoDispatch::do_print`]:
///
/// ```rust,ignore
/// if info.check_level(&selectors, &Value::Integer(2))? {
///     info.do_print(&selectors, &Value::Integer(2), Value::array(vec![expensive_report()]))?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InfoDispatch {
    bindings: Arc<InfoBindings>,
}

impl InfoDispatch {
    pub fn new(bindings: Arc<InfoBindings>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &InfoBindings {
        &self.bindings
    }

    /// Decides whether a message at `level` for `selectors` should be shown.
    ///
    /// The common failing case (a recognized class whose integer level is
    /// below an integer `level`) is answered here without calling the
    /// decision procedure. Everything else goes to the decision procedure
    /// with the arguments unchanged.
    pub fn check_level(&self, selectors: &Value, level: &Value) -> Result<bool, RuntimeError> {
        if self.is_class_list(selectors)
            && let (Some(current), Value::Integer(requested)) = (
                selectors
                    .representative_class()
                    .and_then(|class| class.level_as_int()),
                level,
            )
            && current < *requested
        {
            return Ok(false);
        }

        let decision = self.bindings.decision().ok_or(RuntimeError::Unbound {
            name: DECISION_NAME,
        })?;
        match decision.call(&[selectors.clone(), level.clone()])? {
            Value::Boolean(show) => Ok(show),
            other => Err(RuntimeError::TypeMismatch {
                context: "info decision result",
                expected: "Bool",
                got: other.type_name(),
            }),
        }
    }

    /// Hands a message to the class handler, or to the default handler when
    /// the class has none.
    ///
    /// For a class list only the first class is consulted. No suppression
    /// happens here; handler errors are returned as-is.
    pub fn do_print(
        &self,
        class_or_list: &Value,
        level: &Value,
        args: Value,
    ) -> Result<(), RuntimeError> {
        let class = class_or_list
            .representative_class()
            .ok_or(RuntimeError::TypeMismatch {
                context: "info print selector",
                expected: "InfoClass or non-empty class list",
                got: class_or_list.type_name(),
            })?;

        let handler = match class.handler() {
            Some(handler) => handler,
            None => self
                .bindings
                .default_handler()
                .cloned()
                .ok_or(RuntimeError::Unbound {
                    name: DEFAULT_HANDLER_NAME,
                })?,
        };

        handler.call(&[Value::InfoClass(class.clone()), level.clone(), args])?;
        Ok(())
    }

    /// An unresolved or failing predicate counts as "not a class list".
    #[inline]
    fn is_class_list(&self, selectors: &Value) -> bool {
        match self.bindings.class_list_predicate() {
            Some(predicate) => matches!(
                predicate.call(std::slice::from_ref(selectors)),
                Ok(Value::Boolean(true))
            ),
            None => false,
        }
    }
}
