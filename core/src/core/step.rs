// storefront/src/core/step.rs

//! Step definitions and the boxed handler type used by [`crate::Pipeline`].

use super::ContextData;
use std::future::Future;
use std::pin::Pin;

/// An asynchronous step handler (or rollback handler).
///
/// It receives a clone of the shared [`ContextData`] and resolves to `Ok(())`
/// to let the pipeline continue, or `Err` to abort it and trigger rollback.
pub type Handler<TData, Err> =
  Box<dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<(), Err>> + Send>> + Send + Sync>;

/// A named step in a pipeline.
#[derive(Debug, Clone)]
pub struct StepDef {
  pub name: String,
  /// An optional step without handlers is skipped instead of failing the run.
  pub optional: bool,
}
