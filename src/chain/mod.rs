mod abi;
mod errors;
mod keys;
mod transaction;

pub use abi::{decode_bool, decode_uint8, method_selector, return_value};
pub use errors::{EncodingError, KeyError};
pub use keys::OperatorIdentity;
pub use transaction::{assign_group, BoxReference, SignedTransaction, SuggestedParams, Transaction};
