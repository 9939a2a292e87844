pub mod bootstrap;
pub mod info;
pub mod runtime;
