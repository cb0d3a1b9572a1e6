//! Detached execution of calculator jobs.
//!
//! Each job runs as its own task inside a `JoinSet` owned by the dispatcher, so in-flight
//! jobs can be awaited on shutdown or in tests, or aborted outright. Failures are logged and
//! the job is dropped; nothing is retried.

use std::sync::Arc;

use tokio::{sync::Mutex, task::JoinSet};

use crate::server::{
    model::calculation::CalculationJob, service::calculation::calculator::Calculator,
};

#[derive(Clone)]
pub struct CalculationDispatcher {
    calculator: Arc<dyn Calculator>,
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl CalculationDispatcher {
    pub fn new(calculator: Arc<dyn Calculator>) -> Self {
        Self {
            calculator,
            tasks: Arc::new(Mutex::new(JoinSet::new())),
        }
    }

    /// Spawns a task that hands `job` to the calculator and returns immediately.
    pub async fn dispatch(&self, job: CalculationJob, token: String) {
        let calculator = self.calculator.clone();
        let mut tasks = self.tasks.lock().await;

        // Reap finished jobs so the set only holds in-flight work.
        while tasks.try_join_next().is_some() {}

        tasks.spawn(async move {
            let request_id = job.combustion_id;
            let fuel_id = job.fuel_id;

            match calculator.submit(&job, &token).await {
                Ok(()) => tracing::debug!(request_id, fuel_id, "Calculation job accepted"),
                Err(e) => tracing::error!(request_id, fuel_id, "Calculation job dropped: {}", e),
            }
        });
    }

    /// Number of jobs spawned and not yet reaped.
    pub async fn in_flight(&self) -> usize {
        self.tasks.lock().await.len()
    }

    /// Waits until every dispatched job has finished.
    pub async fn drain(&self) {
        let mut tasks = self.tasks.lock().await;

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                tracing::error!("Calculation task failed: {}", e);
            }
        }
    }

    /// Aborts every in-flight job and waits for the tasks to stop.
    pub async fn shutdown(&self) {
        self.tasks.lock().await.shutdown().await;
    }
}
