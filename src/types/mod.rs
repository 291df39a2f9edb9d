mod address;
mod base_units;
mod errors;

use sha2::{Digest, Sha512_256};

pub use address::Address;
pub use base_units::BaseUnits;
pub use errors::{AddressError, AmountError};

pub type AssetId = u64;
pub type Round = u64;

/// SHA-512/256 over the concatenation of `chunks`, the digest used for every
/// identifier on the network (addresses, transaction ids, group ids, method selectors).
pub fn sha512_256(chunks: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();

    for chunk in chunks {
        hasher.update(chunk);
    }

    hasher.finalize().into()
}
