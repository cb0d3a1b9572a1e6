//! Service tests against an in-memory database, with recording doubles for the calculator
//! and the image store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::server::{
    error::{calculator::CalculatorError, AppError},
    model::calculation::CalculationJob,
    service::{calculation::calculator::Calculator, image::ImageStore},
};

mod auth;

/// Calculator double that records every job with its session token.
#[derive(Default)]
pub struct RecordingCalculator {
    jobs: Mutex<Vec<(CalculationJob, String)>>,
}

impl RecordingCalculator {
    pub fn jobs(&self) -> Vec<(CalculationJob, String)> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Calculator for RecordingCalculator {
    async fn submit(&self, job: &CalculationJob, token: &str) -> Result<(), CalculatorError> {
        self.jobs
            .lock()
            .unwrap()
            .push((job.clone(), token.to_string()));
        Ok(())
    }
}

/// Image store double keeping objects in memory.
#[derive(Default)]
pub struct MemoryImageStore {
    objects: Mutex<Vec<String>>,
    fail_deletes: bool,
}

impl MemoryImageStore {
    pub fn failing_deletes() -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            fail_deletes: true,
        }
    }

    pub fn insert(&self, reference: &str) {
        self.objects.lock().unwrap().push(reference.to_string());
    }

    pub fn objects(&self) -> Vec<String> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn put(&self, name: &str, _bytes: &[u8], _content_type: &str) -> Result<String, AppError> {
        let reference = format!("/images/{}", name);
        self.insert(&reference);
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), AppError> {
        if self.fail_deletes {
            return Err(AppError::InternalError("object store unavailable".to_string()));
        }
        self.objects.lock().unwrap().retain(|r| r != reference);
        Ok(())
    }
}

pub fn recording_calculator() -> Arc<RecordingCalculator> {
    Arc::new(RecordingCalculator::default())
}
