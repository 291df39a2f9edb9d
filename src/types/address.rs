use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_bytes::ByteBuf;

use crate::types::errors::AddressError;
use crate::types::{sha512_256, AssetId};

const ENCODED_LENGTH: usize = 58;
const KEY_LENGTH: usize = 32;
const CHECKSUM_LENGTH: usize = 4;

/// A network account address: the account's 32 byte ed25519 public key.
///
/// The textual form is the unpadded base32 encoding of the key followed by the
/// last four bytes of its SHA-512/256 digest. On the wire (msgpack) an address
/// is the raw 32 byte key.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Address([u8; KEY_LENGTH]);

impl Address {
    pub fn from_public_key(key: [u8; KEY_LENGTH]) -> Self {
        Address(key)
    }

    /// The escrow account controlled by an application.
    pub fn for_application(app_id: AssetId) -> Self {
        Address(sha512_256(&[b"appID", &app_id.to_be_bytes()]))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }

    fn checksum(&self) -> [u8; CHECKSUM_LENGTH] {
        let digest = sha512_256(&[&self.0]);
        let mut checksum = [0u8; CHECKSUM_LENGTH];
        checksum.copy_from_slice(&digest[KEY_LENGTH - CHECKSUM_LENGTH..]);
        checksum
    }
}

impl Display for Address {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let mut raw = Vec::with_capacity(KEY_LENGTH + CHECKSUM_LENGTH);
        raw.extend_from_slice(&self.0);
        raw.extend_from_slice(&self.checksum());
        write!(formatter, "{}", BASE32_NOPAD.encode(&raw))
    }
}

impl Debug for Address {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.len() != ENCODED_LENGTH {
            return Err(AddressError::InvalidLength(value.len()));
        }

        let raw = BASE32_NOPAD.decode(value.as_bytes())?;

        if raw.len() != KEY_LENGTH + CHECKSUM_LENGTH {
            return Err(AddressError::InvalidLength(value.len()));
        }

        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&raw[..KEY_LENGTH]);
        let address = Address(key);

        if address.checksum() != raw[KEY_LENGTH..] {
            return Err(AddressError::ChecksumMismatch);
        }

        Ok(address)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = ByteBuf::deserialize(deserializer)?;
        let key: [u8; KEY_LENGTH] = bytes.as_slice().try_into()
            .map_err(|_| de::Error::invalid_length(bytes.len(), &"a 32 byte public key"))?;

        Ok(Address(key))
    }
}
