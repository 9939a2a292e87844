use crate::{bootstrap::descriptor::SubsystemDescriptor, info::INFO_MODULE};

/// Modules that must come before everything else in the threaded build.
#[cfg(feature = "threads")]
pub static THREAD_PRELUDE_MODULES: &[SubsystemDescriptor] = &[SubsystemDescriptor::builtin("traverse")];

/// Core modules in initialization order (order matters, see `ModuleRegistry`).
pub static CORE_MODULES: &[SubsystemDescriptor] = &[
    // global variables
    SubsystemDescriptor::builtin("globals"),
    // objects
    SubsystemDescriptor::builtin("objects"),
    // profiling and interpreter hooks
    SubsystemDescriptor::builtin("profile"),
    SubsystemDescriptor::builtin("interpreter_hooks"),
    // scanner, reader, interpreter, coder, caller, compiler
    SubsystemDescriptor::builtin("io"),
    SubsystemDescriptor::builtin("scanner"),
    SubsystemDescriptor::builtin("reader"),
    SubsystemDescriptor::builtin("calls"),
    SubsystemDescriptor::builtin("exprs"),
    SubsystemDescriptor::builtin("stats"),
    SubsystemDescriptor::builtin("code"),
    SubsystemDescriptor::builtin("vars").requires(&["exprs", "stats"]),
    SubsystemDescriptor::builtin("funcs"),
    SubsystemDescriptor::builtin("opers"),
    SubsystemDescriptor::builtin("interpreter"),
    SubsystemDescriptor::builtin("compiler"),
    // arithmetic
    SubsystemDescriptor::builtin("ariths"),
    SubsystemDescriptor::builtin("int").requires(&["ariths"]),
    SubsystemDescriptor::builtin("int_funcs").requires(&["int"]),
    SubsystemDescriptor::builtin("rational").requires(&["int"]),
    SubsystemDescriptor::builtin("cyclotomics"),
    SubsystemDescriptor::builtin("finite_fields"),
    SubsystemDescriptor::builtin("permutations"),
    SubsystemDescriptor::builtin("transformations"),
    SubsystemDescriptor::builtin("partial_perms"),
    SubsystemDescriptor::builtin("bool"),
    SubsystemDescriptor::builtin("float"),
    // records
    SubsystemDescriptor::builtin("records"),
    SubsystemDescriptor::builtin("precord").requires(&["records"]),
    // lists
    SubsystemDescriptor::builtin("lists"),
    SubsystemDescriptor::builtin("list_oper").requires(&["lists"]),
    SubsystemDescriptor::builtin("list_func").requires(&["lists"]),
    SubsystemDescriptor::builtin("plist").requires(&["lists"]),
    SubsystemDescriptor::builtin("set").requires(&["plist"]),
    SubsystemDescriptor::builtin("vector").requires(&["plist"]),
    SubsystemDescriptor::builtin("vec_ffe").requires(&["finite_fields", "plist"]),
    SubsystemDescriptor::builtin("blist").requires(&["lists"]),
    SubsystemDescriptor::builtin("range").requires(&["lists"]),
    SubsystemDescriptor::builtin("string").requires(&["lists"]),
    SubsystemDescriptor::builtin("gf2_vec").requires(&["finite_fields"]),
    SubsystemDescriptor::builtin("vec8bit").requires(&["finite_fields"]),
    // free and presented groups
    SubsystemDescriptor::builtin("free_group_elements"),
    SubsystemDescriptor::builtin("coset_table"),
    SubsystemDescriptor::builtin("tietze"),
    SubsystemDescriptor::builtin("pc_elements"),
    SubsystemDescriptor::builtin("collectors"),
    SubsystemDescriptor::builtin("pcc"),
    SubsystemDescriptor::builtin("deep_thought"),
    SubsystemDescriptor::builtin("dt_evaluation").requires(&["deep_thought"]),
    // algebras
    SubsystemDescriptor::builtin("sc_table"),
    // workspaces, weak pointers
    SubsystemDescriptor::builtin("weak_ptr"),
    SubsystemDescriptor::builtin("save_load"),
    // syntax tools
    SubsystemDescriptor::builtin("syntax_tree"),
    // input and output
    SubsystemDescriptor::builtin("streams"),
    SubsystemDescriptor::builtin("sys_files"),
    SubsystemDescriptor::builtin("io_stream"),
    // main modules
    SubsystemDescriptor::builtin("modules"),
    SubsystemDescriptor::builtin("session"),
    SubsystemDescriptor::builtin("error"),
    INFO_MODULE,
    // object sets and maps
    SubsystemDescriptor::builtin("obj_sets"),
];

/// Thread support, appended after the core modules in the threaded build.
#[cfg(feature = "threads")]
pub static THREAD_MODULES: &[SubsystemDescriptor] = &[
    SubsystemDescriptor::builtin("thread_api").requires(&["traverse"]),
    SubsystemDescriptor::builtin("atomic_objects").requires(&["thread_api"]),
    SubsystemDescriptor::builtin("serialize").requires(&["atomic_objects"]),
];
