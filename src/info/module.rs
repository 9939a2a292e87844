use crate::{
    bootstrap::{context::BootContext, descriptor::SubsystemDescriptor},
    info::{bindings::InfoBindings, schema::InfoSchema},
    runtime::{error::RuntimeError, value::Value},
};

/// Registry entry for the info subsystem.
pub const INFO_MODULE: SubsystemDescriptor = SubsystemDescriptor::builtin("info")
    .requires(&["globals"])
    .with_kernel(init_kernel)
    .with_library(init_library);

/// Message handling is delegated to the higher layer; resolve its entry points.
fn init_kernel(ctx: &mut BootContext) -> Result<(), RuntimeError> {
    let bindings = InfoBindings::import(ctx.globals());
    ctx.install_info_bindings(bindings)
}

/// Publish the field positions so the higher layer can build info classes.
fn init_library(ctx: &mut BootContext) -> Result<(), RuntimeError> {
    for (name, position) in InfoSchema::exports() {
        ctx.globals_mut()
            .define_constant(name, Value::Integer(position))?;
    }
    Ok(())
}
