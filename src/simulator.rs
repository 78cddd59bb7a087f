use crate::config::SimulatorConfig;
use crate::error::StoreError;
use crate::process::{Process, ProcessStatus, ProcessStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Decides the outcome of running a process. Nothing is actually called or sent.
pub trait ExecutionSimulator {
    fn simulate(&mut self, process: &Process) -> ProcessStatus;
}

/// Passes a run with a fixed probability.
#[derive(Debug, Clone)]
pub struct RandomSimulator {
    rng: StdRng,
    pass_rate: f64,
}

impl RandomSimulator {
    /// `pass_rate` is clamped to `[0, 1]`.
    pub fn new(pass_rate: f64) -> Self {
        Self::with_rng(StdRng::from_os_rng(), pass_rate)
    }

    pub fn seeded(seed: u64, pass_rate: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), pass_rate)
    }

    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self::new(config.pass_rate)
    }

    fn with_rng(rng: StdRng, pass_rate: f64) -> Self {
        let pass_rate = if pass_rate.is_nan() {
            0.0
        } else {
            pass_rate.clamp(0.0, 1.0)
        };
        Self { rng, pass_rate }
    }
}

impl ExecutionSimulator for RandomSimulator {
    fn simulate(&mut self, _process: &Process) -> ProcessStatus {
        if self.rng.random_bool(self.pass_rate) {
            ProcessStatus::Passed
        } else {
            ProcessStatus::Failed
        }
    }
}

/// Runs the stored process `id` through `simulator` and records the resulting status.
pub fn execute_process(
    store: &mut dyn ProcessStore,
    simulator: &mut dyn ExecutionSimulator,
    id: &str,
) -> Result<ProcessStatus, StoreError> {
    let mut process = store
        .get(id)?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    let status = simulator.simulate(&process);
    info!(%id, name = %process.name, %status, "Executed process");
    process.status = status;
    store.put(process)?;
    Ok(status)
}
