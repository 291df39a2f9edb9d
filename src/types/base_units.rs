use std::fmt;
use std::fmt::{Display, Formatter};

use num_bigint::BigUint;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::errors::AmountError;

const UINT256_BITS: u64 = 256;
const UINT256_BYTES: usize = 32;

/// An amount expressed in the smallest indivisible unit of an asset.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BaseUnits(BigUint);

impl BaseUnits {
    /// Scales a display amount by `10^decimals`, rounding half away from zero to a whole
    /// number of base units.
    ///
    /// Rounding happens in decimal arithmetic before the exact integer scaling, so no
    /// binary floating point is involved at any step.
    ///
    /// # Errors
    /// Returns `AmountError` if the amount is negative or the result exceeds a uint256.
    pub fn from_display(amount: Decimal, decimals: u8) -> Result<Self, AmountError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(AmountError::Negative(amount));
        }

        let rounded = amount.round_dp_with_strategy(u32::from(decimals), RoundingStrategy::MidpointAwayFromZero);
        let exponent = u32::from(decimals).saturating_sub(rounded.scale());
        let value = BigUint::from(rounded.mantissa().unsigned_abs()) * BigUint::from(10u32).pow(exponent);

        if value.bits() > UINT256_BITS {
            return Err(AmountError::Overflow(value));
        }

        Ok(BaseUnits(value))
    }

    /// Big-endian, zero padded ABI `uint256` encoding.
    pub fn to_uint256(&self) -> [u8; UINT256_BYTES] {
        let bytes = self.0.to_bytes_be();
        let mut encoded = [0u8; UINT256_BYTES];
        encoded[UINT256_BYTES - bytes.len()..].copy_from_slice(&bytes);
        encoded
    }
}

impl Display for BaseUnits {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
