use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seqflow::{RunWindow, SequentialFlow, Step, StepDef, StepError, StepRegistry};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Common Benchmark State and Step ---
#[derive(Clone, Debug, Default)]
struct BenchState {
  counter: u64,
  artifacts: Vec<u64>,
}

struct CountingStep {
  id: String,
  iterations: u64,
}

#[async_trait]
impl Step<BenchState> for CountingStep {
  fn id(&self) -> &str {
    &self.id
  }

  async fn run(&self, state: &BenchState) -> Result<BenchState, StepError> {
    let mut next = state.clone();
    for _i in 0..self.iterations {
      // Simulate some CPU-bound work
      next.counter = next.counter.wrapping_add(1);
    }
    next.artifacts.push(next.counter);
    Ok(next)
  }
}

fn counting_def(index: usize, iterations: u64) -> StepDef<BenchState> {
  let id = format!("step_{}", index);
  StepDef::new(id.clone(), id.clone(), move || {
    Box::new(CountingStep {
      id: id.clone(),
      iterations,
    }) as Box<dyn Step<BenchState>>
  })
}

fn counting_flow(num_steps: usize, iterations: u64) -> SequentialFlow<BenchState> {
  SequentialFlow::new("Bench", (0..num_steps).map(|i| counting_def(i, iterations)).collect())
}

// --- Benchmark Functions ---

fn bench_full_run(c: &mut Criterion) {
  let mut group = c.benchmark_group("FullRun");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 5, 10, 50].iter() {
    for iterations in [1u64, 100].iter() {
      let flow = Arc::new(counting_flow(*num_steps, *iterations));

      group.throughput(Throughput::Elements(*num_steps as u64));
      group.bench_with_input(
        BenchmarkId::new(format!("{}steps_{}iter", num_steps, iterations), *num_steps),
        num_steps,
        |b, _| {
          b.to_async(&rt).iter_batched(
            BenchState::default,
            |state| {
              let f = flow.clone();
              async move { f.run(state, &RunWindow::full()).await.unwrap() }
            },
            criterion::BatchSize::SmallInput,
          );
        },
      );
    }
  }
  group.finish();
}

fn bench_windowed_run(c: &mut Criterion) {
  let mut group = c.benchmark_group("WindowedRun");
  let rt = Runtime::new().unwrap();
  let flow = Arc::new(counting_flow(50, 1));

  // Same flow, shrinking windows: measures the cost of skipped stages.
  for from in [0usize, 25, 49].iter() {
    let window = RunWindow::full().from_step(format!("step_{}", from));
    group.bench_with_input(BenchmarkId::from_parameter(*from), from, |b, _| {
      b.to_async(&rt).iter_batched(
        BenchState::default,
        |state| {
          let f = flow.clone();
          let w = window.clone();
          async move { f.run(state, &w).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_build_flow(c: &mut Criterion) {
  let mut group = c.benchmark_group("BuildFlow");
  let registry = StepRegistry::new();
  for i in 0..100 {
    registry.register(counting_def(i, 1)).unwrap();
  }
  let ids: Vec<String> = (0..100).step_by(5).map(|i| format!("step_{}", i)).collect();

  group.throughput(Throughput::Elements(ids.len() as u64));
  group.bench_function("20_of_100", |b| {
    b.iter(|| criterion::black_box(registry.build_flow(&ids).unwrap()))
  });
  group.finish();
}

criterion_group!(benches, bench_full_run, bench_windowed_run, bench_build_flow);
criterion_main!(benches);
