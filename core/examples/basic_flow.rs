// seqflow/examples/basic_flow.rs

use async_trait::async_trait;
use seqflow::{FlowResult, RunWindow, SequentialFlow, StageProgress, Step, StepDef, StepError};
use tracing::info;

// 1. Define the state threaded through the flow
#[derive(Clone, Debug, Default)]
struct DesignState {
  netlist: Option<String>,
  placed: bool,
  routed: bool,
}

// 2. Define the steps. Each returns a new state; the input is left untouched.
#[derive(Default)]
struct Synthesis;

#[async_trait]
impl Step<DesignState> for Synthesis {
  fn id(&self) -> &str {
    "Synthesis"
  }

  fn name(&self) -> &str {
    "Yosys Synthesis"
  }

  async fn run(&self, state: &DesignState) -> Result<DesignState, StepError> {
    info!("Synthesizing design");
    Ok(DesignState {
      netlist: Some("top.nl.v".to_string()),
      ..state.clone()
    })
  }
}

#[derive(Default)]
struct Placement;

#[async_trait]
impl Step<DesignState> for Placement {
  fn id(&self) -> &str {
    "Placement"
  }

  async fn run(&self, state: &DesignState) -> Result<DesignState, StepError> {
    let netlist = state
      .netlist
      .as_deref()
      .ok_or_else(|| StepError::missing_input("Placement: no netlist"))?;
    info!("Placing {}", netlist);
    Ok(DesignState {
      placed: true,
      ..state.clone()
    })
  }
}

#[derive(Default)]
struct Routing;

#[async_trait]
impl Step<DesignState> for Routing {
  fn id(&self) -> &str {
    "Routing"
  }

  async fn run(&self, state: &DesignState) -> Result<DesignState, StepError> {
    if !state.placed {
      return Err(StepError::missing_input("Routing: design is not placed"));
    }
    info!("Routing placed design");
    Ok(DesignState {
      routed: true,
      ..state.clone()
    })
  }
}

#[tokio::main]
async fn main() -> FlowResult<()> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Flow Example ---");

  // 3. Declare the flow
  let flow = SequentialFlow::new(
    "Classic",
    vec![
      StepDef::of::<Synthesis>(),
      StepDef::of::<Placement>(),
      StepDef::of::<Routing>(),
    ],
  );

  // 4. Run every step
  let run = flow.run(DesignState::default(), &RunWindow::full()).await?;
  info!("Full run executed {:?}", run.executed_ids());
  assert!(run.final_state().routed);

  // 5. Run only up to placement, watching progress
  let progress = StageProgress::new();
  let head = flow
    .run_with_progress(DesignState::default(), &RunWindow::full().to_step("Placement"), &progress)
    .await?;
  let snapshot = progress.snapshot();
  info!(
    "Head run executed {:?} ({} of {} stages)",
    head.executed_ids(),
    snapshot.completed(),
    snapshot.max_stage_count
  );
  assert!(!head.final_state().routed);

  // 6. Resume from routing with the state the head run left behind
  let window = RunWindow::full().from_step("Routing");
  flow.validate_window(&window)?;
  let tail = flow.run(head.final_state().clone(), &window).await?;
  info!("Tail run executed {:?}", tail.executed_ids());
  assert!(tail.final_state().routed);
  assert_eq!(tail.states().len(), 2);

  Ok(())
}
