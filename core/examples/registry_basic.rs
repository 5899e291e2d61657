// seqflow/examples/registry_basic.rs

use async_trait::async_trait;
use seqflow::{FlowError, FlowResult, RunWindow, Step, StepDef, StepError, StepRegistry};
use std::sync::Arc;
use tracing::info;

// 1. State: a log of the stages that ran
#[derive(Clone, Debug, Default)]
struct Log {
  lines: Vec<String>,
}

// 2. One step type, registered under several ids
struct Echo {
  id: &'static str,
}

#[async_trait]
impl Step<Log> for Echo {
  fn id(&self) -> &str {
    self.id
  }

  async fn run(&self, state: &Log) -> Result<Log, StepError> {
    let mut lines = state.lines.clone();
    lines.push(format!("{} done", self.id));
    Ok(Log { lines })
  }
}

fn echo(id: &'static str, name: &'static str) -> StepDef<Log> {
  StepDef::new(id, name, move || Box::new(Echo { id }) as Box<dyn Step<Log>>)
}

#[tokio::main]
async fn main() -> FlowResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Step Registry Example ---");

  // 3. Populate a registry shared across the application
  let registry = Arc::new(StepRegistry::new());
  registry.register(echo("Lint", "Verilator Lint"))?;
  registry.register(echo("Synthesis", "Yosys Synthesis"))?;
  registry.register(echo("Floorplan", "Floorplan Init"))?;
  registry.register(echo("Placement", "Global Placement"))?;
  info!("Registered steps: {:?}", registry.ids());

  // Registering an id twice is refused
  if let Err(err) = registry.register(echo("Lint", "Another Lint")) {
    info!("Rejected: {}", err);
  }

  // 4. Assemble a flow from ids chosen at runtime
  let requested = ["Synthesis", "Floorplan", "Placement"];
  let flow = registry.build_flow(requested)?;
  info!("Built '{}' with {:?}", flow.name(), flow.step_ids());

  // 5. Run part of it
  let run = flow
    .run(Log::default(), &RunWindow::full().from_step("Floorplan"))
    .await?;
  for line in &run.final_state().lines {
    info!("- {}", line);
  }
  assert_eq!(run.executed_ids(), vec!["Floorplan", "Placement"]);

  // 6. Unknown ids fail before any step is built
  match registry.build_flow(["Synthesis", "Routing"]) {
    Err(FlowError::UnknownStep { step_id }) => info!("Unknown step '{}'", step_id),
    other => panic!("expected an unknown step error, got {:?}", other.map(|f| f.step_ids().len())),
  }

  Ok(())
}
