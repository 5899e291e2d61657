// seqflow/examples/error_handling.rs

use async_trait::async_trait;
use seqflow::{FlowError, FlowErrorKind, RunWindow, SequentialFlow, Step, StepDef, StepError};
use tracing::{error, info, warn};

// 1. Define the state: the set of files produced so far
#[derive(Clone, Debug, Default)]
struct Files {
  produced: Vec<String>,
}

impl Files {
  fn with(&self, file: &str) -> Self {
    let mut produced = self.produced.clone();
    produced.push(file.to_string());
    Self { produced }
  }
}

// 2. A step that needs one file and produces another
struct Produce {
  id: &'static str,
  needs: Option<&'static str>,
  output: &'static str,
}

#[async_trait]
impl Step<Files> for Produce {
  fn id(&self) -> &str {
    self.id
  }

  async fn run(&self, state: &Files) -> Result<Files, StepError> {
    if let Some(needed) = self.needs {
      if !state.produced.iter().any(|f| f == needed) {
        return Err(StepError::missing_input(format!("{} needs '{}'", self.id, needed)));
      }
    }
    Ok(state.with(self.output))
  }
}

// 3. A step wrapping an external tool that exits non-zero
struct BrokenTool;

#[async_trait]
impl Step<Files> for BrokenTool {
  fn id(&self) -> &str {
    "Signoff"
  }

  async fn run(&self, _state: &Files) -> Result<Files, StepError> {
    Err(StepError::tool_failure("magic -dnull -noconsole drc.tcl", Some(2)))
  }
}

fn produce(id: &'static str, needs: Option<&'static str>, output: &'static str) -> StepDef<Files> {
  StepDef::new(id, id, move || Box::new(Produce { id, needs, output }) as Box<dyn Step<Files>>)
}

fn flow() -> SequentialFlow<Files> {
  SequentialFlow::new(
    "Checked",
    vec![
      produce("Synthesis", None, "top.nl.v"),
      produce("Placement", Some("top.nl.v"), "top.def"),
      StepDef::new("Signoff", "Signoff", || Box::new(BrokenTool) as Box<dyn Step<Files>>),
    ],
  )
}

// 4. Branch on the error category
fn report(err: &FlowError) {
  match err.kind() {
    FlowErrorKind::Input => warn!(
      step = ?err.step_id(),
      "Missing input, rerun with an earlier window or a richer initial state: {}",
      err
    ),
    FlowErrorKind::Execution => error!(step = ?err.step_id(), "Tool failed, giving up: {}", err),
    FlowErrorKind::Configuration => warn!("Fix the flow or window and retry: {}", err),
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  let flow = flow();

  // Scenario 1: starting after synthesis leaves placement without a netlist
  info!("\nScenario 1: input error");
  let err = flow
    .run(Files::default(), &RunWindow::full().from_step("Placement"))
    .await
    .unwrap_err();
  report(&err);
  assert_eq!(err.kind(), FlowErrorKind::Input);
  assert!(err.is_recoverable());

  // Scenario 2: seeding the state fixes it
  info!("\nScenario 2: seeded state");
  let seeded = Files::default().with("top.nl.v");
  let run = flow
    .run(seeded, &RunWindow::full().from_step("Placement").to_step("Placement"))
    .await
    .expect("seeded run succeeds");
  info!("Produced {:?}", run.final_state().produced);

  // Scenario 3: a tool failure is not recoverable
  info!("\nScenario 3: execution error");
  let err = flow.run(Files::default(), &RunWindow::full()).await.unwrap_err();
  report(&err);
  assert_eq!(err.kind(), FlowErrorKind::Execution);
  assert!(!err.is_recoverable());

  // Scenario 4: a window boundary naming no step
  info!("\nScenario 4: configuration error");
  let err = flow
    .validate_window(&RunWindow::full().from_step("Floorplan"))
    .unwrap_err();
  report(&err);
  assert_eq!(err.kind(), FlowErrorKind::Configuration);
}
