use std::{fmt, time::Instant};

use serde::Serialize;

use crate::bootstrap::{
    context::BootContext,
    descriptor::Phase,
    error::BootError,
    registry::ModuleRegistry,
};

/// Progress of a [`Bootstrap`] through its two phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootState {
    /// No phase has run yet.
    Fresh,
    /// Every kernel hook completed.
    KernelDone,
    /// Every library hook completed; the runtime is up.
    LibraryDone,
    /// A hook failed. Terminal.
    Failed,
}

impl fmt::Display for BootState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BootState::Fresh => "fresh",
            BootState::KernelDone => "past the kernel phase",
            BootState::LibraryDone => "complete",
            BootState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// One hook invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookRecord {
    pub phase: Phase,
    pub module: &'static str,
    pub elapsed_us: u64,
    pub ok: bool,
}

/// Every hook invocation made by a [`Bootstrap`], in call order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BootReport {
    pub hooks: Vec<HookRecord>,
}

impl BootReport {
    pub fn invoked(&self, phase: Phase) -> impl Iterator<Item = &'static str> + '_ {
        self.hooks
            .iter()
            .filter(move |record| record.phase == phase)
            .map(|record| record.module)
    }

    pub fn total_elapsed_us(&self) -> u64 {
        self.hooks.iter().map(|record| record.elapsed_us).sum()
    }
}

/// Runs a registry through the kernel phase and then the library phase.
///
/// Each phase runs once, in registry order. The first failing hook stops the
/// phase and leaves the bootstrap in [`BootState::Failed`].
#[derive(Debug)]
pub struct Bootstrap {
    registry: ModuleRegistry,
    state: BootState,
    report: BootReport,
}

impl Bootstrap {
    pub fn new(registry: ModuleRegistry) -> Self {
        Self {
            registry,
            state: BootState::Fresh,
            report: BootReport::default(),
        }
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn state(&self) -> BootState {
        self.state
    }

    pub fn report(&self) -> &BootReport {
        &self.report
    }

    pub fn run_kernel_phase(&mut self, ctx: &mut BootContext) -> Result<(), BootError> {
        self.expect_state(Phase::Kernel, BootState::Fresh)?;
        self.run_phase(Phase::Kernel, ctx)?;
        self.state = BootState::KernelDone;
        Ok(())
    }

    /// Library hooks may rely on every kernel hook in the registry having run.
    pub fn run_library_phase(&mut self, ctx: &mut BootContext) -> Result<(), BootError> {
        self.expect_state(Phase::Library, BootState::KernelDone)?;
        self.run_phase(Phase::Library, ctx)?;
        self.state = BootState::LibraryDone;
        Ok(())
    }

    /// Runs both phases.
    pub fn boot(&mut self, ctx: &mut BootContext) -> Result<(), BootError> {
        self.run_kernel_phase(ctx)?;
        self.run_library_phase(ctx)
    }

    fn expect_state(&self, phase: Phase, expected: BootState) -> Result<(), BootError> {
        if self.state != expected {
            return Err(BootError::PhaseOrder {
                phase,
                state: self.state,
            });
        }
        Ok(())
    }

    fn run_phase(&mut self, phase: Phase, ctx: &mut BootContext) -> Result<(), BootError> {
        log::debug!("{} phase: {} modules", phase, self.registry.len());
        let started = Instant::now();

        for module in self.registry.iter() {
            let Some(hook) = module.hook(phase) else {
                continue;
            };

            let hook_started = Instant::now();
            let outcome = hook(ctx);
            self.report.hooks.push(HookRecord {
                phase,
                module: module.name,
                elapsed_us: hook_started.elapsed().as_micros() as u64,
                ok: outcome.is_ok(),
            });

            if let Err(source) = outcome {
                log::error!(
                    "{} initialization of module '{}' failed: {}",
                    phase,
                    module.name,
                    source
                );
                self.state = BootState::Failed;
                return Err(BootError::HookFailed {
                    phase,
                    module: module.name,
                    source,
                });
            }
            log::debug!("{} hook of '{}' done", phase, module.name);
        }

        log::debug!(
            "{} phase finished in {}us",
            phase,
            started.elapsed().as_micros()
        );
        Ok(())
    }
}
