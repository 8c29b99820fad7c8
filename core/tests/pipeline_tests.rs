// tests/pipeline_tests.rs
mod common;

use common::setup_tracing;
use serial_test::serial;
use storefront::{ContextData, Pipeline, PipelineError};

#[derive(Debug, Default, Clone)]
struct Journal {
  ran: Vec<String>,
  undone: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum TestError {
  #[error("step {0} failed")]
  Boom(String),
  #[error(transparent)]
  Pipeline(#[from] PipelineError),
}

fn record(name: &'static str) -> impl Fn(ContextData<Journal>) -> std::future::Ready<Result<(), TestError>> {
  move |ctx: ContextData<Journal>| {
    ctx.write().ran.push(name.to_string());
    std::future::ready(Ok(()))
  }
}

fn undo(name: &'static str) -> impl Fn(ContextData<Journal>) -> std::future::Ready<Result<(), TestError>> {
  move |ctx: ContextData<Journal>| {
    ctx.write().undone.push(name.to_string());
    std::future::ready(Ok(()))
  }
}

fn three_steps() -> Pipeline<Journal, TestError> {
  Pipeline::new(&[("reserve", false), ("charge", false), ("ship", false)])
}

#[tokio::test]
#[serial]
async fn test_steps_run_in_declared_order() {
  setup_tracing();
  let mut p = three_steps();
  p.on_step("ship", record("ship"));
  p.on_step("reserve", record("reserve"));
  p.on_step("charge", record("charge"));
  p.on_rollback("reserve", undo("reserve"));

  let ctx = ContextData::new(Journal::default());
  p.run(ctx.clone()).await.unwrap();

  let journal = ctx.read();
  assert_eq!(journal.ran, vec!["reserve", "charge", "ship"]);
  assert!(journal.undone.is_empty());
}

#[tokio::test]
#[serial]
async fn test_failure_rolls_back_failed_and_earlier_steps_in_reverse() {
  setup_tracing();
  let mut p = three_steps();
  p.on_step("reserve", record("reserve"));
  p.on_step("charge", |ctx: ContextData<Journal>| async move {
    ctx.write().ran.push("charge".to_string());
    Err::<(), _>(TestError::Boom("charge".to_string()))
  });
  p.on_step("ship", record("ship"));
  p.on_rollback("reserve", undo("reserve"));
  p.on_rollback("charge", undo("charge"));
  p.on_rollback("ship", undo("ship"));

  let ctx = ContextData::new(Journal::default());
  let err = p.run(ctx.clone()).await.unwrap_err();

  assert!(matches!(err, TestError::Boom(ref s) if s == "charge"));
  let journal = ctx.read();
  assert_eq!(journal.ran, vec!["reserve", "charge"]);
  assert_eq!(journal.undone, vec!["charge", "reserve"]);
}

#[tokio::test]
#[serial]
async fn test_rollback_failure_keeps_original_error() {
  setup_tracing();
  let mut p = three_steps();
  p.on_step("reserve", record("reserve"));
  p.on_step("charge", record("charge"));
  p.on_step("ship", |_ctx: ContextData<Journal>| async move {
    Err::<(), _>(TestError::Boom("ship".to_string()))
  });
  p.on_rollback("charge", |_ctx: ContextData<Journal>| async move {
    Err::<(), _>(TestError::Boom("refund".to_string()))
  });
  p.on_rollback("reserve", undo("reserve"));

  let ctx = ContextData::new(Journal::default());
  let err = p.run(ctx.clone()).await.unwrap_err();

  assert!(matches!(err, TestError::Boom(ref s) if s == "ship"));
  assert_eq!(ctx.read().undone, vec!["reserve"]);
}

#[tokio::test]
#[serial]
async fn test_missing_handler_on_required_step() {
  setup_tracing();
  let mut p = three_steps();
  p.on_step("reserve", record("reserve"));
  p.on_step("ship", record("ship"));
  p.on_rollback("reserve", undo("reserve"));

  let ctx = ContextData::new(Journal::default());
  let err = p.run(ctx.clone()).await.unwrap_err();

  match err {
    TestError::Pipeline(PipelineError::HandlerMissing { step_name }) => assert_eq!(step_name, "charge"),
    other => panic!("Expected HandlerMissing, got {:?}", other),
  }
  let journal = ctx.read();
  assert_eq!(journal.ran, vec!["reserve"]);
  assert_eq!(journal.undone, vec!["reserve"]);
}

#[tokio::test]
#[serial]
async fn test_optional_step_without_handler_is_skipped() {
  setup_tracing();
  let mut p = Pipeline::<Journal, TestError>::new(&[("reserve", false), ("notify", true), ("ship", false)]);
  p.on_step("reserve", record("reserve"));
  p.on_step("ship", record("ship"));

  let ctx = ContextData::new(Journal::default());
  p.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().ran, vec!["reserve", "ship"]);
  assert_eq!(p.step_names().collect::<Vec<_>>(), vec!["reserve", "notify", "ship"]);
}

#[test]
#[should_panic(expected = "step 'refund' not found")]
fn test_registering_unknown_step_panics() {
  let mut p = three_steps();
  p.on_step("refund", record("refund"));
}
