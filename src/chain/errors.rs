use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Mnemonic error: expected 25 words but found {0}")]
    WordCount(usize),
    #[error("Mnemonic error: [{0}] is not in the word list")]
    UnknownWord(String),
    #[error("Mnemonic error: checksum word does not match")]
    ChecksumMismatch,
    #[error("Mnemonic error: seed has non-zero padding")]
    InvalidPadding,
    #[error("Mnemonic error: seed was rejected as an ed25519 key")]
    InvalidSeed
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Encoding error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Encoding error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("Encoding error: {0}")]
    Decode(#[from] rmp_serde::decode::Error)
}
