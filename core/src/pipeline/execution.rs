// storefront/src/pipeline/execution.rs

//! Contains `Pipeline::run()`: executes steps in order and rolls back on failure.

use crate::core::context_data::ContextData;
use crate::error::PipelineError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, Instrument, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx_data`.
  ///
  /// On the first handler error the rollback handlers of the failing step and
  /// of all earlier steps run, last step first, and the original error is
  /// returned. Rollback failures are logged; they never replace that error.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      pipeline_context_data_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<(), Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let handlers = match self.on.get(step_name) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ if step_def.optional => {
          event!(Level::DEBUG, step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        _ => {
          event!(Level::ERROR, step_name, "Non-optional step has no handlers.");
          let err = Err::from(PipelineError::HandlerMissing {
            step_name: step_def.name.clone(),
          });
          self.roll_back(step_idx, &ctx_data).await;
          return Err(err);
        }
      };

      let step_span = tracing::info_span!("pipeline_step", step_name, step_index = step_idx);
      for handler_fn in handlers {
        if let Err(e) = handler_fn(ctx_data.clone()).instrument(step_span.clone()).await {
          event!(Level::WARN, step_name, error = %e, "Step failed, rolling back.");
          self.roll_back(step_idx, &ctx_data).await;
          return Err(e);
        }
      }
      event!(Level::DEBUG, step_name, "Step finished.");
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(())
  }

  /// Runs rollback handlers for steps `0..=failed_idx`, newest first.
  async fn roll_back(&self, failed_idx: usize, ctx_data: &ContextData<TData>) {
    for step_def in self.steps[..=failed_idx].iter().rev() {
      let Some(handlers) = self.rollback.get(step_def.name.as_str()) else {
        continue;
      };
      for handler_fn in handlers {
        if let Err(e) = handler_fn(ctx_data.clone()).await {
          event!(Level::ERROR, step_name = %step_def.name, error = %e, "Rollback handler failed.");
        }
      }
    }
  }
}
