//! Client side of the external combustion calculator.

use std::time::Duration;

use async_trait::async_trait;

use crate::server::{error::calculator::CalculatorError, model::calculation::CalculationJob};

/// Header carrying the session token to the calculator.
pub const SERVICE_TOKEN_HEADER: &str = "X-Service-Token";

/// Accepts calculation jobs. Results come back later through the callback endpoint.
#[async_trait]
pub trait Calculator: Send + Sync {
    async fn submit(&self, job: &CalculationJob, token: &str) -> Result<(), CalculatorError>;
}

/// Posts jobs as JSON to the calculator's HTTP endpoint.
pub struct HttpCalculator {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpCalculator {
    pub fn new(client: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Calculator for HttpCalculator {
    async fn submit(&self, job: &CalculationJob, token: &str) -> Result<(), CalculatorError> {
        let response = self
            .client
            .post(&self.url)
            .header(SERVICE_TOKEN_HEADER, token)
            .timeout(self.timeout)
            .json(job)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalculatorError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
