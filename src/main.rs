use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kestrel::{
    bootstrap::{BootConfig, BootContext, Bootstrap, ModuleRegistry},
    info::{
        CLASS_LIST_PREDICATE_NAME, DECISION_NAME, DEFAULT_HANDLER_NAME, InfoSchema, StorageKind,
    },
    runtime::{
        error::RuntimeError, globals::GlobalTable, native_function::NativeFunction, value::Value,
    },
};

#[derive(Parser, Debug)]
#[command(
    name = "kestrel",
    version,
    about = "Boot the kestrel runtime and inspect its subsystems"
)]
struct Cli {
    #[arg(long, default_value_t = false, help = "Log every hook invocation")]
    verbose: bool,
    #[arg(long, default_value_t = false, help = "Print the module registry and exit")]
    list_modules: bool,
    #[arg(long, default_value_t = false, help = "Print the info class layout as JSON")]
    schema: bool,
    #[arg(long, default_value_t = false, help = "Print the boot report as JSON")]
    report: bool,
    #[arg(long, value_enum, help = "Info class storage (defaults to the build's choice)")]
    storage: Option<StorageArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StorageArg {
    Record,
    Keyed,
}

impl From<StorageArg> for StorageKind {
    fn from(arg: StorageArg) -> Self {
        match arg {
            StorageArg::Record => StorageKind::Record,
            StorageArg::Keyed => StorageKind::Keyed,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let registry = ModuleRegistry::builtin();
    registry
        .validate()
        .context("builtin module registry is inconsistent")?;

    if cli.list_modules {
        for (index, module) in registry.iter().enumerate() {
            let hooks = match (module.kernel_init.is_some(), module.library_init.is_some()) {
                (true, true) => "kernel+library",
                (true, false) => "kernel",
                (false, true) => "library",
                (false, false) => "-",
            };
            println!("{:>3} {:<20} {:<8} {}", index, module.name, module.kind, hooks);
        }
        return Ok(());
    }

    if cli.schema {
        let schema = serde_json::to_string_pretty(&InfoSchema::current())?;
        println!("{schema}");
        return Ok(());
    }

    let config = BootConfig {
        storage: cli.storage.map(StorageKind::from).unwrap_or_default(),
    };
    let mut ctx = BootContext::with_globals(config, host_globals()?);
    let mut boot = Bootstrap::new(registry);
    boot.boot(&mut ctx).context("runtime bootstrap failed")?;

    if cli.report {
        let report = serde_json::to_string_pretty(boot.report())?;
        println!("{report}");
        return Ok(());
    }

    let info = ctx
        .info_dispatch()
        .context("info subsystem did not install its bindings")?;
    let class = ctx.declare_info_class("InfoBootstrap");
    class.set_level(Value::Integer(1));
    let selectors = Value::InfoClass(class);
    let level = Value::Integer(1);
    if info.check_level(&selectors, &level)? {
        let summary = format!(
            "{} modules booted with {} storage in {}us",
            boot.registry().len(),
            config.storage.label(),
            boot.report().total_elapsed_us()
        );
        info.do_print(&selectors, &level, Value::array(vec![Value::string(&summary)]))?;
    }
    Ok(())
}

/// Minimal stand-in for the higher layer: a threshold decision, a printing
/// default handler and a class-list recognizer.
fn host_globals() -> Result<GlobalTable, RuntimeError> {
    let mut globals = GlobalTable::new();
    globals.define_function(NativeFunction::new(DECISION_NAME, |args| {
        let [selectors, level] = args else {
            return Err(RuntimeError::Arity {
                name: DECISION_NAME.to_string(),
                expected: 2,
                got: args.len(),
            });
        };
        let current = selectors
            .representative_class()
            .and_then(|class| class.level_as_int())
            .unwrap_or(0);
        Ok(Value::Boolean(level.as_int().is_some_and(|level| current >= level)))
    }))?;
    globals.define_function(NativeFunction::new(DEFAULT_HANDLER_NAME, |args| {
        let [class, level, message] = args else {
            return Err(RuntimeError::Arity {
                name: DEFAULT_HANDLER_NAME.to_string(),
                expected: 3,
                got: args.len(),
            });
        };
        let parts: Vec<String> = match message {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.to_string(),
                    other => other.to_string(),
                })
                .collect(),
            other => vec![other.to_string()],
        };
        println!("#I [{class} {level}] {}", parts.join(""));
        Ok(Value::None)
    }))?;
    globals.define_function(NativeFunction::new(CLASS_LIST_PREDICATE_NAME, |args| {
        let recognized = args
            .first()
            .and_then(Value::representative_class)
            .is_some();
        Ok(Value::Boolean(recognized))
    }))?;
    Ok(globals)
}
