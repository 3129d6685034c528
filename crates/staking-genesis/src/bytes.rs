//! Dynamic `bytes` storage encoding.
//!
//! Payloads of up to 31 bytes are stored inline in the header slot, left-aligned,
//! with `len * 2` in the lowest byte. Longer payloads store `len * 2 + 1` in the
//! header slot and the data itself in consecutive slots starting at
//! `keccak256(header key)`, 32 bytes per slot, the last slot zero-padded.
//!
//! The parity of the header tells the two forms apart.

use crate::{
    error::{Result, StakingGenesisError},
    map::StorageMap,
    storage::{index_with_offset, u256_value},
};
use alloc::vec::Vec;
use alloy_primitives::{keccak256, Bytes, B256, U256};

/// Number of bytes held by one storage slot.
pub const SLOT_BYTES: usize = 32;

/// Longest payload kept inline in the header slot.
pub const MAX_INLINE_LEN: usize = SLOT_BYTES - 1;

/// Write `data` into `storage` as a dynamic byte string rooted at `base`.
///
/// Every slot the encoding touches is fully rewritten, so packing the same payload
/// twice leaves the map unchanged.
pub fn set_bytes_to_storage(storage: &mut StorageMap, base: B256, data: &[u8]) -> Result<()> {
    let len = data.len();

    if len <= MAX_INLINE_LEN {
        let mut slot = B256::ZERO;
        slot[..len].copy_from_slice(data);
        slot[SLOT_BYTES - 1] = (len * 2) as u8;
        storage.insert(base, slot);
        return Ok(());
    }

    storage.insert(base, u256_value(long_form_header(len)));

    let data_start = keccak256(base);
    for (offset, chunk) in data.chunks(SLOT_BYTES).enumerate() {
        let mut slot = B256::ZERO;
        slot[..chunk.len()].copy_from_slice(chunk);
        storage.insert(index_with_offset(data_start, offset as u64)?, slot);
    }

    Ok(())
}

/// Read back a dynamic byte string rooted at `base`.
///
/// An unset header decodes as the empty string. A long-form header claiming data
/// slots that were never written is malformed.
pub fn get_bytes_from_storage(storage: &StorageMap, base: B256) -> Result<Bytes> {
    let header = storage.get(&base);
    let malformed = || StakingGenesisError::MalformedBytes { key: base };

    if header[SLOT_BYTES - 1] & 1 == 0 {
        let len = (header[SLOT_BYTES - 1] / 2) as usize;
        if len > MAX_INLINE_LEN || header[len..SLOT_BYTES - 1].iter().any(|b| *b != 0) {
            return Err(malformed());
        }
        return Ok(Bytes::copy_from_slice(&header[..len]));
    }

    let len: usize = (U256::from_be_bytes(header.0) >> 1usize)
        .try_into()
        .map_err(|_| malformed())?;
    if len <= MAX_INLINE_LEN {
        return Err(malformed());
    }

    let data_start = keccak256(base);
    let mut data = Vec::new();
    for offset in 0..len.div_ceil(SLOT_BYTES) as u64 {
        let key = index_with_offset(data_start, offset).map_err(|_| malformed())?;
        if !storage.contains_key(&key) {
            return Err(malformed());
        }
        data.extend_from_slice(storage.get(&key).as_slice());
    }
    data.truncate(len);

    Ok(data.into())
}

/// Header value of a long-form byte string.
fn long_form_header(len: usize) -> U256 {
    U256::from(len) * U256::from(2) + U256::from(1)
}
