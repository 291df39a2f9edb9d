use data_encoding::DecodeError;
use num_bigint::BigUint;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("Address error: expected 58 characters but found {0}")]
    InvalidLength(usize),
    #[error("Address error: {0}")]
    InvalidEncoding(#[from] DecodeError),
    #[error("Address error: checksum mismatch")]
    ChecksumMismatch
}

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: {0} is negative")]
    Negative(Decimal),
    #[error("Amount error: {0} base units do not fit in a uint256")]
    Overflow(BigUint)
}
