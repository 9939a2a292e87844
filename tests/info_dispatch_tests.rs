use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use kestrel::{
    info::{InfoBindings, InfoClass, InfoDispatch, StorageKind},
    runtime::{error::RuntimeError, native_function::NativeFunction, value::Value},
};
use proptest::prelude::*;

fn exploding_decision() -> NativeFunction {
    NativeFunction::new("info_decision", |_| {
        Err(RuntimeError::raised("decision procedure must not be consulted"))
    })
}

fn constant_decision(answer: bool, calls: Arc<AtomicUsize>) -> NativeFunction {
    NativeFunction::new("info_decision", move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Boolean(answer))
    })
}

fn class_list_predicate(affirm: bool) -> NativeFunction {
    NativeFunction::new("is_info_class_list", move |args| {
        let recognized = matches!(args.first(), Some(Value::InfoClass(_) | Value::Array(_)));
        Ok(Value::Boolean(affirm && recognized))
    })
}

fn silent_handler() -> NativeFunction {
    NativeFunction::new("default_info_handler", |_| Ok(Value::None))
}

fn dispatch(decision: NativeFunction, affirm: bool) -> InfoDispatch {
    InfoDispatch::new(Arc::new(InfoBindings::new(
        decision,
        silent_handler(),
        class_list_predicate(affirm),
    )))
}

fn class_at(level: i64, kind: StorageKind) -> InfoClass {
    let class = InfoClass::new(1, "InfoTest", kind);
    class.set_level(Value::Integer(level));
    class
}

type Calls = Arc<Mutex<Vec<(String, Vec<Value>)>>>;

fn recording_handler(name: &str, calls: Calls) -> NativeFunction {
    let label = name.to_string();
    NativeFunction::new(name, move |args| {
        calls.lock().unwrap().push((label.clone(), args.to_vec()));
        Ok(Value::None)
    })
}

proptest! {
    #[test]
    fn below_threshold_is_suppressed_without_decision(
        current in -1_000i64..1_000,
        gap in 1i64..1_000,
        keyed in any::<bool>(),
    ) {
        let kind = if keyed { StorageKind::Keyed } else { StorageKind::Record };
        let info = dispatch(exploding_decision(), true);
        let selectors = Value::InfoClass(class_at(current, kind));

        prop_assert_eq!(info.check_level(&selectors, &Value::Integer(current + gap)), Ok(false));
    }

    #[test]
    fn at_or_above_threshold_defers_to_decision(
        level in -1_000i64..1_000,
        excess in 0i64..1_000,
        answer in any::<bool>(),
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let info = dispatch(constant_decision(answer, calls.clone()), true);
        let selectors = Value::InfoClass(class_at(level + excess, StorageKind::Record));

        prop_assert_eq!(info.check_level(&selectors, &Value::Integer(level)), Ok(answer));
        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unrecognized_selectors_always_defer(
        current in -100i64..100,
        level in -100i64..100,
        answer in any::<bool>(),
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let info = dispatch(constant_decision(answer, calls.clone()), false);
        let selectors = Value::InfoClass(class_at(current, StorageKind::Keyed));

        prop_assert_eq!(info.check_level(&selectors, &Value::Integer(level)), Ok(answer));
        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn class_list_uses_first_class_level() {
    let info = dispatch(exploding_decision(), true);
    let quiet = class_at(0, StorageKind::Record);
    let loud = class_at(10, StorageKind::Record);
    let selectors = Value::array(vec![Value::InfoClass(quiet), Value::InfoClass(loud)]);

    assert_eq!(info.check_level(&selectors, &Value::Integer(3)), Ok(false));
}

#[test]
fn non_integer_level_takes_general_path() {
    let calls = Arc::new(AtomicUsize::new(0));
    let info = dispatch(constant_decision(true, calls.clone()), true);
    let selectors = Value::InfoClass(class_at(0, StorageKind::Record));

    assert_eq!(info.check_level(&selectors, &Value::string("infinity")), Ok(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn non_integer_class_level_takes_general_path() {
    let calls = Arc::new(AtomicUsize::new(0));
    let info = dispatch(constant_decision(false, calls.clone()), true);
    let class = InfoClass::new(1, "InfoOdd", StorageKind::Keyed);
    class.set_level(Value::Float(0.5));

    assert_eq!(
        info.check_level(&Value::InfoClass(class), &Value::Integer(7)),
        Ok(false)
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn decision_receives_arguments_unchanged() {
    let seen: Calls = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let decision = NativeFunction::new("info_decision", move |args| {
        recorder.lock().unwrap().push(("decision".to_string(), args.to_vec()));
        Ok(Value::Boolean(true))
    });
    let info = dispatch(decision, true);
    let class = class_at(5, StorageKind::Record);
    let selectors = Value::array(vec![Value::InfoClass(class)]);
    let level = Value::Integer(2);

    assert_eq!(info.check_level(&selectors, &level), Ok(true));
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].1, vec![selectors.clone(), level]);
}

#[test]
fn unresolved_predicate_falls_through_to_decision() {
    let calls = Arc::new(AtomicUsize::new(0));
    let bindings = InfoBindings::unresolved().with_decision(constant_decision(true, calls.clone()));
    let info = InfoDispatch::new(Arc::new(bindings));
    let selectors = Value::InfoClass(class_at(0, StorageKind::Record));

    assert_eq!(info.check_level(&selectors, &Value::Integer(9)), Ok(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failing_predicate_counts_as_not_a_list() {
    let calls = Arc::new(AtomicUsize::new(0));
    let bindings = InfoBindings::unresolved()
        .with_decision(constant_decision(false, calls.clone()))
        .with_class_list_predicate(NativeFunction::new("is_info_class_list", |_| {
            Err(RuntimeError::raised("predicate exploded"))
        }));
    let info = InfoDispatch::new(Arc::new(bindings));
    let selectors = Value::InfoClass(class_at(0, StorageKind::Record));

    assert_eq!(info.check_level(&selectors, &Value::Integer(9)), Ok(false));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fast_path_works_without_decision_procedure() {
    let bindings = InfoBindings::unresolved().with_class_list_predicate(class_list_predicate(true));
    let info = InfoDispatch::new(Arc::new(bindings));
    let selectors = Value::InfoClass(class_at(0, StorageKind::Record));

    assert_eq!(info.check_level(&selectors, &Value::Integer(1)), Ok(false));
}

#[test]
fn unresolved_decision_fails_loudly() {
    let info = InfoDispatch::new(Arc::new(InfoBindings::unresolved()));
    let selectors = Value::InfoClass(class_at(0, StorageKind::Record));

    assert_eq!(
        info.check_level(&selectors, &Value::Integer(1)),
        Err(RuntimeError::Unbound {
            name: "info_decision"
        })
    );
}

#[test]
fn non_boolean_decision_is_a_type_error() {
    let info = dispatch(
        NativeFunction::new("info_decision", |_| Ok(Value::Integer(1))),
        false,
    );
    let selectors = Value::InfoClass(class_at(0, StorageKind::Record));

    assert!(matches!(
        info.check_level(&selectors, &Value::Integer(0)),
        Err(RuntimeError::TypeMismatch { got: "Int", .. })
    ));
}

#[test]
fn decision_errors_propagate() {
    let info = dispatch(exploding_decision(), false);
    let selectors = Value::InfoClass(class_at(0, StorageKind::Record));

    assert_eq!(
        info.check_level(&selectors, &Value::Integer(0)),
        Err(RuntimeError::raised("decision procedure must not be consulted"))
    );
}

#[test]
fn print_uses_class_handler_when_set() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let bindings = InfoBindings::new(
        exploding_decision(),
        recording_handler("default", calls.clone()),
        class_list_predicate(true),
    );
    let info = InfoDispatch::new(Arc::new(bindings));
    let class = class_at(3, StorageKind::Keyed);
    class.set_handler(Some(recording_handler("own", calls.clone())));
    let args = Value::array(vec![Value::string("pivot found"), Value::Integer(17)]);

    info.do_print(&Value::InfoClass(class.clone()), &Value::Integer(2), args.clone())
        .unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "own");
    assert_eq!(
        calls[0].1,
        vec![Value::InfoClass(class), Value::Integer(2), args]
    );
}

#[test]
fn print_falls_back_to_default_handler() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let bindings = InfoBindings::new(
        exploding_decision(),
        recording_handler("default", calls.clone()),
        class_list_predicate(true),
    );
    let info = InfoDispatch::new(Arc::new(bindings));
    let class = class_at(3, StorageKind::Record);
    let args = Value::array(vec![Value::string("done")]);

    info.do_print(&Value::InfoClass(class.clone()), &Value::Integer(1), args.clone())
        .unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "default");
    assert_eq!(
        calls[0].1,
        vec![Value::InfoClass(class), Value::Integer(1), args]
    );
}

#[test]
fn print_on_list_consults_only_first_class() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let bindings = InfoBindings::new(
        exploding_decision(),
        recording_handler("default", calls.clone()),
        class_list_predicate(true),
    );
    let info = InfoDispatch::new(Arc::new(bindings));
    let first = class_at(1, StorageKind::Record);
    let second = class_at(1, StorageKind::Record);
    second.set_handler(Some(recording_handler("second", calls.clone())));
    let list = Value::array(vec![
        Value::InfoClass(first.clone()),
        Value::InfoClass(second),
    ]);

    info.do_print(&list, &Value::Integer(1), Value::array(vec![]))
        .unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "default");
    assert_eq!(calls[0].1[0], Value::InfoClass(first));
}

#[test]
fn print_propagates_handler_error_unchanged() {
    let info = dispatch(exploding_decision(), true);
    let class = class_at(1, StorageKind::Record);
    class.set_handler(Some(NativeFunction::new("broken", |_| {
        Err(RuntimeError::raised("stream closed"))
    })));

    assert_eq!(
        info.do_print(&Value::InfoClass(class), &Value::Integer(1), Value::array(vec![])),
        Err(RuntimeError::raised("stream closed"))
    );
}

#[test]
fn print_without_default_handler_fails_loudly() {
    let info = InfoDispatch::new(Arc::new(InfoBindings::unresolved()));
    let class = class_at(1, StorageKind::Record);

    assert_eq!(
        info.do_print(&Value::InfoClass(class), &Value::Integer(1), Value::array(vec![])),
        Err(RuntimeError::Unbound {
            name: "default_info_handler"
        })
    );
}

#[test]
fn print_rejects_non_class_selectors() {
    let info = dispatch(exploding_decision(), true);

    assert!(matches!(
        info.do_print(&Value::array(vec![]), &Value::Integer(1), Value::None),
        Err(RuntimeError::TypeMismatch { .. })
    ));
    assert!(matches!(
        info.do_print(&Value::Integer(4), &Value::Integer(1), Value::None),
        Err(RuntimeError::TypeMismatch { got: "Int", .. })
    ));
}

#[test]
fn booted_context_dispatches_through_imported_bindings() {
    use kestrel::bootstrap::{BootConfig, BootContext, Bootstrap, ModuleRegistry};
    use kestrel::runtime::globals::GlobalTable;

    let printed: Calls = Arc::new(Mutex::new(Vec::new()));
    let mut globals = GlobalTable::new();
    globals
        .define_function(NativeFunction::new("info_decision", |args| {
            let class = args[0].representative_class().unwrap();
            let level = args[1].as_int().unwrap();
            Ok(Value::Boolean(class.level_as_int().unwrap_or(0) >= level))
        }))
        .unwrap();
    globals
        .define_function(recording_handler("default_info_handler", printed.clone()))
        .unwrap();
    globals.define_function(class_list_predicate(true)).unwrap();

    let mut ctx = BootContext::with_globals(
        BootConfig {
            storage: StorageKind::Keyed,
        },
        globals,
    );
    Bootstrap::new(ModuleRegistry::builtin())
        .boot(&mut ctx)
        .unwrap();

    let info = ctx.info_dispatch().unwrap();
    let class = ctx.declare_info_class("InfoMatrix");
    class.set_level(Value::Integer(2));
    let selectors = Value::InfoClass(class);

    assert_eq!(info.check_level(&selectors, &Value::Integer(3)), Ok(false));
    assert_eq!(info.check_level(&selectors, &Value::Integer(2)), Ok(true));
    info.do_print(&selectors, &Value::Integer(2), Value::array(vec![Value::string("rank 4")]))
        .unwrap();

    assert_eq!(printed.lock().unwrap().len(), 1);
    assert_eq!(ctx.declare_info_class("InfoMatrix").ordinal(), 1);
    assert_eq!(ctx.declare_info_class("InfoLattice").ordinal(), 2);
}
