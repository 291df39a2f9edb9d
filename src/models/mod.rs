mod errors;
mod log_entry;
mod record;
mod transfer;

pub use errors::{PipelineError, SubmissionError};
pub use log_entry::{LogEntry, Outcome};
pub use record::DisbursementRecord;
pub use transfer::{TransferAttempt, TransferRequest};

/// How a single record left the pipeline when it did not halt the run.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Every transaction of the record's batch was confirmed.
    Completed { transaction_ids: Vec<String> },
    /// The recipient has no signing authorization, nothing was sent.
    Skipped
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub skipped: usize
}
