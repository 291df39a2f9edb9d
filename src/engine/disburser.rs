use std::sync::Arc;

use tracing::{error, info, warn};

use crate::engine::executor::TransferExecutor;
use crate::engine::precision::PrecisionCache;
use crate::engine::submission::Submitter;
use crate::engine::DisbursementContext;
use crate::models::{DisbursementRecord, LogEntry, PipelineError, RecordOutcome, RunSummary};
use crate::network::AccountLookup;
use crate::storage::AuditLog;
use crate::types::BaseUnits;

/// Runs the disbursement pipeline over a fully loaded record set.
///
/// Records are handled strictly one after another. A recipient without a signing
/// authorization is skipped; every other failure halts the run after it has been
/// written to the audit log.
pub struct Disburser {
    accounts: Arc<dyn AccountLookup>,
    precision: PrecisionCache,
    executor: TransferExecutor,
    submitter: Submitter,
    audit: AuditLog
}

impl Disburser {
    pub fn new(context: DisbursementContext) -> Self {
        Self {
            accounts: context.accounts,
            precision: PrecisionCache::new(context.contract.clone()),
            executor: TransferExecutor::new(context.contract, context.policy.retry_payment),
            submitter: Submitter::new(context.operator, context.ledger, context.policy.confirmation_rounds),
            audit: context.audit
        }
    }

    pub async fn run(&self, records: &[DisbursementRecord]) -> Result<RunSummary, PipelineError> {
        let mut summary = RunSummary::default();

        for (index, record) in records.iter().enumerate() {
            info!(
                "Processing record {}/{}: tokenId [{}] address [{}] amount [{}]",
                index + 1, records.len(), record.asset_id, record.recipient, record.amount
            );

            match self.process(record).await {
                Ok(RecordOutcome::Completed { transaction_ids }) => {
                    summary.completed += 1;
                    info!("Successfully processed tokenId [{}] for address [{}]: {:?}", record.asset_id, record.recipient, transaction_ids);
                },
                Ok(RecordOutcome::Skipped) => {
                    summary.skipped += 1;
                },
                Err(pipeline_error) => {
                    error!("{pipeline_error}");

                    if let Err(log_error) = self.audit.append(&LogEntry::failure(record, pipeline_error.reason())) {
                        error!("Unable to record the failure in [{}]: {log_error}", self.audit.path().display());
                    }

                    return Err(pipeline_error);
                }
            }
        }

        Ok(summary)
    }

    async fn process(&self, record: &DisbursementRecord) -> Result<RecordOutcome, PipelineError> {
        let signature_type = self.accounts.signature_type(&record.recipient).await
            .map_err(|error| PipelineError::account_lookup(record, error))?;

        if signature_type.is_none() {
            warn!("Address [{}] has no signing authorization, skipping", record.recipient);
            return Ok(RecordOutcome::Skipped);
        }

        let decimals = self.precision.decimals(record.asset_id).await
            .map_err(|error| PipelineError::decimals(record, error))?;

        let amount = BaseUnits::from_display(record.amount, decimals)
            .map_err(|error| PipelineError::amount(record, error))?;

        let attempt = self.executor.execute(record.asset_id, record.recipient, amount).await
            .map_err(|exhausted| PipelineError::transfer_exhausted(record, exhausted.attempts, exhausted.detail))?;

        let confirmations = self.submitter.sign_send_and_confirm(&attempt.txns).await
            .map_err(|error| PipelineError::submission(record, error))?;

        self.audit.append(&LogEntry::success(record))
            .map_err(|error| PipelineError::audit_log(record, error))?;

        Ok(RecordOutcome::Completed {
            transaction_ids: confirmations.into_iter().map(|confirmation| confirmation.txid).collect()
        })
    }
}
