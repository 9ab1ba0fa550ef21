//! Fixed-width primitive codec for call scripts and ABI words.
//!
//! Everything here is big-endian. Encoders are infallible; decoders take exactly one field and
//! reject any other width with [`CodecError::MalformedInput`].

use alloy_primitives::{Address, U256};

/// Width of an ABI word.
pub const WORD_LEN: usize = 32;
/// Width of an address.
pub const ADDRESS_LEN: usize = 20;
/// Width of a call-script payload length prefix.
pub const LENGTH_LEN: usize = 4;

/// Errors while decoding fixed-width primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("malformed input: expected {expected} bytes, got {actual}")]
    MalformedInput { expected: usize, actual: usize },
    #[error("malformed input: invalid hex ({0})")]
    InvalidHex(String),
}

impl CodecError {
    fn check(expected: usize, bytes: &[u8]) -> Result<(), Self> {
        if bytes.len() != expected {
            return Err(CodecError::MalformedInput {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(())
    }
}

/// Left-pad an address to a 32-byte ABI word.
pub fn encode_address(address: Address) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    word[WORD_LEN - ADDRESS_LEN..].copy_from_slice(address.as_slice());
    word
}

/// Read the address held in the low 20 bytes of a 32-byte word.
pub fn decode_address(word: &[u8]) -> Result<Address, CodecError> {
    CodecError::check(WORD_LEN, word)?;
    Ok(Address::from_slice(&word[WORD_LEN - ADDRESS_LEN..]))
}

/// Read a raw (unpadded) 20-byte address.
pub fn decode_raw_address(bytes: &[u8]) -> Result<Address, CodecError> {
    CodecError::check(ADDRESS_LEN, bytes)?;
    Ok(Address::from_slice(bytes))
}

pub fn encode_uint256(value: U256) -> [u8; WORD_LEN] {
    value.to_be_bytes::<WORD_LEN>()
}

/// Decode an unsigned big-endian 32-byte word.
pub fn decode_uint256(bytes: &[u8]) -> Result<U256, CodecError> {
    CodecError::check(WORD_LEN, bytes)?;
    Ok(U256::from_be_slice(bytes))
}

/// Encode a payload length prefix.
///
/// Payloads longer than `u32::MAX` bytes cannot be expressed in a call script; passing one is a
/// caller bug.
pub fn encode_length(len: usize) -> [u8; LENGTH_LEN] {
    debug_assert!(len <= u32::MAX as usize);
    (len as u32).to_be_bytes()
}

pub fn decode_length(bytes: &[u8]) -> Result<u32, CodecError> {
    CodecError::check(LENGTH_LEN, bytes)?;
    let mut buf = [0u8; LENGTH_LEN];
    buf.copy_from_slice(bytes);
    Ok(u32::from_be_bytes(buf))
}

/// Render bytes as a `0x`-prefixed lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
    out
}

/// Parse a hex string, with or without the `0x` prefix.
pub fn from_hex(input: &str) -> Result<Vec<u8>, CodecError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    hex::decode(digits).map_err(|err| CodecError::InvalidHex(format!("{err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn address_word_is_left_padded() {
        let a = address!("fbe66da8066711d53cf7b23f701f53f9814e8b9e");
        let word = encode_address(a);
        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(decode_address(&word).unwrap(), a);
    }

    #[test]
    fn uint256_is_big_endian() {
        let word = encode_uint256(U256::from(1000u64));
        assert_eq!(word[30], 0x03);
        assert_eq!(word[31], 0xe8);
        assert_eq!(decode_uint256(&word).unwrap(), U256::from(1000u64));
    }

    #[test]
    fn wrong_widths_are_malformed() {
        assert_eq!(
            decode_address(&[0u8; 31]),
            Err(CodecError::MalformedInput { expected: 32, actual: 31 })
        );
        assert!(decode_raw_address(&[0u8; 19]).is_err());
        assert!(decode_uint256(&[]).is_err());
        assert_eq!(
            decode_raw_address(&[0u8; 21]),
            Err(CodecError::MalformedInput { expected: 20, actual: 21 })
        );
        assert!(decode_address(&[0u8; 33]).is_err());
        assert_eq!(
            decode_length(&[0, 0, 1]),
            Err(CodecError::MalformedInput { expected: 4, actual: 3 })
        );
    }

    #[test]
    fn length_prefix() {
        assert_eq!(encode_length(0x64), [0, 0, 0, 0x64]);
        assert_eq!(decode_length(&[0, 0, 0, 0xe4]).unwrap(), 228);
    }

    #[test]
    fn hex_helpers() {
        assert_eq!(to_hex(&[0, 0, 0, 1]), "0x00000001");
        assert_eq!(from_hex("0x00000001").unwrap(), vec![0, 0, 0, 1]);
        assert_eq!(from_hex("beabacc8").unwrap(), vec![0xbe, 0xab, 0xac, 0xc8]);
        assert!(matches!(from_hex("0xzz"), Err(CodecError::InvalidHex(_))));
        assert!(from_hex("0x123").is_err());
    }
}
