use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::DisbursementRecord;
use crate::types::{Address, AssetId};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success,
    Failure(String)
}

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub asset_id: AssetId,
    pub recipient: Address,
    pub outcome: Outcome
}

impl LogEntry {
    pub fn success(record: &DisbursementRecord) -> Self {
        Self::now(record, Outcome::Success)
    }

    pub fn failure(record: &DisbursementRecord, reason: impl Into<String>) -> Self {
        Self::now(record, Outcome::Failure(reason.into()))
    }

    fn now(record: &DisbursementRecord, outcome: Outcome) -> Self {
        Self {
            timestamp: Utc::now(),
            asset_id: record.asset_id,
            recipient: record.recipient,
            outcome
        }
    }

    pub fn message(&self) -> String {
        match &self.outcome {
            Outcome::Success => format!(
                "Successfully processed tokenId {} for address {}", self.asset_id, self.recipient
            ),
            Outcome::Failure(reason) => format!(
                "Error processing tokenId {} for address {}: {}", self.asset_id, self.recipient, reason
            )
        }
    }
}

impl Display for LogEntry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} - {}", self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true), self.message())
    }
}
