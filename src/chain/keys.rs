use std::fmt;
use std::fmt::{Debug, Formatter};

use bip39::Language;
use ring::signature::{Ed25519KeyPair, KeyPair};

use crate::chain::errors::KeyError;
use crate::types::{sha512_256, Address};

const MNEMONIC_WORDS: usize = 25;
const SEED_LENGTH: usize = 32;
const BITS_PER_WORD: u32 = 11;
const WORD_MASK: u32 = 0x7ff;
const SIGNATURE_LENGTH: usize = 64;

/// The single funded account that signs every outgoing transaction of a run.
///
/// The key pair only ever lives in memory and is never printed.
pub struct OperatorIdentity {
    address: Address,
    key_pair: Ed25519KeyPair
}

impl OperatorIdentity {
    /// Recovers the operator key from a 25 word mnemonic.
    ///
    /// The first 24 words carry the 32 byte seed as little-endian 11 bit groups of the
    /// BIP-39 English word list; the last word is a checksum over the seed.
    ///
    /// # Errors
    /// Returns `KeyError` for a wrong word count, unknown words, a bad checksum or
    /// a seed the ed25519 implementation refuses.
    pub fn from_mnemonic(phrase: &str) -> Result<Self, KeyError> {
        let seed = seed_from_mnemonic(phrase)?;
        Self::from_seed(&seed)
    }

    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Result<Self, KeyError> {
        let key_pair = Ed25519KeyPair::from_seed_unchecked(seed)
            .map_err(|_| KeyError::InvalidSeed)?;

        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(key_pair.public_key().as_ref());

        Ok(Self {
            address: Address::from_public_key(public_key),
            key_pair
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(self.key_pair.sign(message).as_ref());
        signature
    }
}

impl Debug for OperatorIdentity {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("OperatorIdentity")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

pub(crate) fn checksum_word(seed: &[u8; SEED_LENGTH]) -> u16 {
    let digest = sha512_256(&[seed]);
    let bits = u32::from(digest[0]) | u32::from(digest[1]) << 8;
    (bits & WORD_MASK) as u16
}

fn seed_from_mnemonic(phrase: &str) -> Result<[u8; SEED_LENGTH], KeyError> {
    let words: Vec<&str> = phrase.split_whitespace().collect();

    if words.len() != MNEMONIC_WORDS {
        return Err(KeyError::WordCount(words.len()));
    }

    let indices = words.iter()
        .map(|word| {
            Language::English.find_word(&word.to_lowercase())
                .ok_or_else(|| KeyError::UnknownWord(word.to_string()))
        })
        .collect::<Result<Vec<u16>, KeyError>>()?;

    let Some((checksum, data)) = indices.split_last() else {
        return Err(KeyError::WordCount(0));
    };

    let mut bytes = Vec::with_capacity(SEED_LENGTH + 1);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for index in data {
        buffer |= u32::from(*index) << bits;
        bits += BITS_PER_WORD;

        while bits >= 8 {
            bytes.push((buffer & 0xff) as u8);
            buffer >>= 8;
            bits -= 8;
        }
    }

    if bits > 0 {
        bytes.push((buffer & 0xff) as u8);
    }

    // 24 words carry 264 bits: the seed plus one byte of zero padding
    if bytes.len() != SEED_LENGTH + 1 || bytes[SEED_LENGTH] != 0 {
        return Err(KeyError::InvalidPadding);
    }

    let mut seed = [0u8; SEED_LENGTH];
    seed.copy_from_slice(&bytes[..SEED_LENGTH]);

    if checksum_word(&seed) != *checksum {
        return Err(KeyError::ChecksumMismatch);
    }

    Ok(seed)
}
