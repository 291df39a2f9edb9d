use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

use crate::types::{Address, AssetId};

/// Represents a single row from the input CSV file.
///
/// Every field is validated while the row is read, so a record that exists is
/// one the pipeline can act on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisbursementRecord {
    /// The token (application) id.
    #[serde(rename = "tokenId")]
    pub asset_id: AssetId,
    /// The receiving account.
    #[serde(rename = "address", deserialize_with = "parse_address")]
    pub recipient: Address,
    /// Quantity in display units, before scaling by the token's decimals.
    #[serde(deserialize_with = "parse_amount")]
    pub amount: Decimal
}

fn parse_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Address::from_str(&value).map_err(de::Error::custom)
}

//NOTE: Going through String keeps the amount exact, a numeric hint from the reader would detour through f64
fn parse_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    if !is_plain_decimal(value.trim()) {
        return Err(de::Error::custom(format!("invalid amount [{value}]: expected digits with an optional fraction")));
    }

    let amount = Decimal::from_str(value.trim())
        .map_err(|error| de::Error::custom(format!("invalid amount [{value}]: {error}")))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(de::Error::custom(format!("amount [{value}] is negative")));
    }

    Ok(amount)
}

//NOTE: Decimal::from_str ignores underscores, so "1_5" would otherwise load as 15
fn is_plain_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|byte| byte.is_ascii_digit())
        && fraction.bytes().all(|byte| byte.is_ascii_digit())
}
