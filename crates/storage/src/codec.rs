//! RLP codec for block headers.
//!
//! Headers are round-tripped through their canonical RLP form. The codec is
//! pure and deterministic; [`decode_header`] is the exact inverse of
//! [`encode_header`] for every header the latter accepts.

use crate::{error::StorageError, slot::MAX_HEIGHT};
use alloy_consensus::Header;
use alloy_primitives::Bytes;
use alloy_rlp::{Decodable, Encodable};

/// Serializes a header to its RLP representation.
///
/// Fails with [`StorageError::Encode`] if the header's number lies beyond
/// [`MAX_HEIGHT`], since such a header could never be addressed on the
/// versioned store's height axis again.
pub fn encode_header(header: &Header) -> Result<Bytes, StorageError> {
    if header.number > MAX_HEIGHT {
        return Err(StorageError::Encode(format!(
            "block number {} exceeds the maximum storable height {MAX_HEIGHT}",
            header.number
        )));
    }
    let mut buf = Vec::with_capacity(header.length());
    header.encode(&mut buf);
    Ok(buf.into())
}

/// Deserializes a header from its RLP representation.
///
/// Fails with [`StorageError::Decode`] on malformed input, including input
/// with trailing bytes after a well-formed header.
pub fn decode_header(mut bytes: &[u8]) -> Result<Header, StorageError> {
    let header = Header::decode(&mut bytes).map_err(StorageError::Decode)?;
    if !bytes.is_empty() {
        return Err(StorageError::Decode(alloy_rlp::Error::Custom(
            "trailing bytes after header",
        )));
    }
    Ok(header)
}
