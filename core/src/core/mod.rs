// storefront/src/core/mod.rs

//! Building blocks shared by pipelines: the lockable context wrapper and step definitions.

pub mod context_data;
pub mod step;

pub use context_data::ContextData;
pub use step::{Handler, StepDef};
