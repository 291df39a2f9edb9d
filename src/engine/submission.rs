use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use crate::chain::{OperatorIdentity, SignedTransaction, Transaction};
use crate::models::SubmissionError;
use crate::network::{NetworkError, TransactionSubmitter};
use crate::types::Round;

#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub txid: String,
    pub round: Round
}

/// Signs a built transfer with the operator key, broadcasts it and waits for every
/// transaction in it to confirm.
pub struct Submitter {
    operator: Arc<OperatorIdentity>,
    ledger: Arc<dyn TransactionSubmitter>,
    confirmation_rounds: Round
}

impl Submitter {
    pub fn new(operator: Arc<OperatorIdentity>, ledger: Arc<dyn TransactionSubmitter>, confirmation_rounds: Round) -> Self {
        Self { operator, ledger, confirmation_rounds }
    }

    pub async fn sign_send_and_confirm(&self, txns: &[String]) -> Result<Vec<Confirmation>, SubmissionError> {
        let signed = txns.iter()
            .map(|payload| Transaction::from_base64(payload).and_then(|transaction| transaction.sign(&self.operator)))
            .collect::<Result<Vec<_>, _>>()?;

        let txids = signed.iter()
            .map(SignedTransaction::id)
            .collect::<Result<Vec<_>, _>>()?;

        let blobs = signed.iter()
            .map(SignedTransaction::encode)
            .collect::<Result<Vec<_>, _>>()?;

        let reported = self.ledger.send_raw(&blobs).await?;
        debug!("Broadcast {} transaction(s), node reported [{reported}]", blobs.len());

        let confirmations = txids.iter().map(|txid| async move {
            let round = self.ledger.wait_for_confirmation(txid, self.confirmation_rounds).await?;
            debug!("Transaction [{txid}] confirmed in round {round}");

            Ok::<_, NetworkError>(Confirmation {
                txid: txid.clone(),
                round
            })
        });

        Ok(try_join_all(confirmations).await?)
    }
}
