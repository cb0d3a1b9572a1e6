use thiserror::Error;

/// Failures while handing a job to the external calculator.
///
/// These never reach an HTTP client: dispatch tasks log them and drop the job.
#[derive(Error, Debug)]
pub enum CalculatorError {
    /// The request could not be sent or timed out.
    #[error("Calculator request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The calculator answered with a non-success status.
    #[error("Calculator responded with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
