mod context;
mod disburser;
mod executor;
mod precision;
mod submission;

pub use context::{DisbursementContext, DisbursementPolicy, DEFAULT_CONFIRMATION_ROUNDS, DEFAULT_RETRY_PAYMENT};
pub use disburser::Disburser;
