use crate::types::sha512_256;

/// Marks the application log line that carries an ABI method's return value.
const RETURN_PREFIX: [u8; 4] = [0x15, 0x1f, 0x7c, 0x75];

pub fn method_selector(signature: &str) -> [u8; 4] {
    let digest = sha512_256(&[signature.as_bytes()]);
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&digest[..4]);
    selector
}

/// The return value is always the last log emitted by the call.
pub fn return_value(logs: &[Vec<u8>]) -> Option<&[u8]> {
    logs.last()
        .filter(|log| log.starts_with(&RETURN_PREFIX))
        .map(|log| &log[RETURN_PREFIX.len()..])
}

pub fn decode_uint8(value: &[u8]) -> Option<u8> {
    match value {
        [byte] => Some(*byte),
        _ => None
    }
}

pub fn decode_bool(value: &[u8]) -> Option<bool> {
    match value {
        [byte] => Some(byte & 0x80 != 0),
        _ => None
    }
}
