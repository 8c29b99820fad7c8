// storefront/src/pipeline/definition.rs

//! Contains the `Pipeline<TData, Err>` struct definition and its constructor.

use crate::core::step::{Handler, StepDef};
use crate::error::PipelineError;
use std::collections::HashMap;

/// An ordered list of named steps run against one shared context.
///
/// Each step has `on` handlers (the work) and may have `rollback` handlers
/// (compensation). When a handler fails, the rollback handlers of the failed
/// step and of every step before it run in reverse order before the error is
/// returned.
///
/// `Err` must be `From<PipelineError>` so configuration problems found at run
/// time (e.g. a step with no handler) surface through the same error type.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) rollback: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(step_name, optional)` pairs, in execution order.
  pub fn new(step_defs: &[(&str, bool)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
      })
      .collect();

    Self {
      steps,
      on: HashMap::new(),
      rollback: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> impl Iterator<Item = &str> {
    self.steps.iter().map(|s| s.name.as_str())
  }

  /// Panics if `step_name` was not declared in [`Pipeline::new`].
  /// A typo in a step name is a setup bug, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("Pipeline setup error: step '{}' not found in pipeline definition.", step_name);
    }
  }
}

impl<TData, Err> std::fmt::Debug for Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("steps", &self.steps)
      .field("steps_with_rollback", &self.rollback.keys().collect::<Vec<_>>())
      .finish()
  }
}
