//! Storage key generation for the staking contract.
//!
//! Keys follow the Solidity storage layout convention:
//! - scalar at slot `p` lives at `pad32(p)`
//! - `mapping(address => T)` at slot `p` stores key `k` at `keccak256(pad32(k) . pad32(p))`
//! - dynamic array at slot `p` stores its length at `pad32(p)` and element `i` at
//!   `keccak256(pad32(p)) + i`

use crate::error::{Result, StakingGenesisError};
use alloy_primitives::{keccak256, Address, B256, U256};

/// Declared position of a contract state variable.
///
/// Slot numbers are fixed by the compiled contract and are never derived.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StorageSlot(u64);

impl StorageSlot {
    /// Creates a slot from its declared number.
    pub const fn new(slot: u64) -> Self {
        Self(slot)
    }

    /// Returns the declared slot number.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the slot number as a 256-bit integer.
    pub const fn as_u256(self) -> U256 {
        U256::from_limbs([self.0, 0, 0, 0])
    }

    /// Returns the storage key of the slot itself, left-padded to 32 bytes.
    pub fn key(self) -> B256 {
        B256::from(self.as_u256().to_be_bytes::<32>())
    }
}

impl From<u64> for StorageSlot {
    fn from(slot: u64) -> Self {
        Self(slot)
    }
}

impl TryFrom<i64> for StorageSlot {
    type Error = StakingGenesisError;

    fn try_from(slot: i64) -> Result<Self> {
        u64::try_from(slot)
            .map(Self)
            .map_err(|_| StakingGenesisError::NegativeSlot(slot))
    }
}

/// Storage layout of the staking contract.
///
/// Matches the declaration order of the contract's state variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StakingLayout {
    /// `address[] validators`
    pub validators: StorageSlot,
    /// `mapping(address => bool) addressToIsValidator`
    pub is_validator: StorageSlot,
    /// `mapping(address => uint256) addressToStakedAmount`
    pub staked_amount: StorageSlot,
    /// `mapping(address => uint256) addressToValidatorIndex`
    pub validator_index: StorageSlot,
    /// `uint256 stakedAmount`
    pub total_staked: StorageSlot,
    /// `uint256 minimumNumValidators`
    pub min_validators: StorageSlot,
    /// `uint256 maximumNumValidators`
    pub max_validators: StorageSlot,
    /// `mapping(address => bytes) addressToBLSPublicKey`
    pub bls_public_key: StorageSlot,
}

impl StakingLayout {
    /// Layout of the deployed staking contract.
    pub const STAKING_CONTRACT: Self = Self {
        validators: StorageSlot::new(0),
        is_validator: StorageSlot::new(1),
        staked_amount: StorageSlot::new(2),
        validator_index: StorageSlot::new(3),
        total_staked: StorageSlot::new(4),
        min_validators: StorageSlot::new(5),
        max_validators: StorageSlot::new(6),
        bls_public_key: StorageSlot::new(7),
    };
}

impl Default for StakingLayout {
    fn default() -> Self {
        Self::STAKING_CONTRACT
    }
}

/// Generate storage key for an address-keyed mapping entry.
///
/// Key format: `keccak256([address left-padded to 32][slot left-padded to 32])`
pub fn address_mapping_key(address: &Address, slot: StorageSlot) -> B256 {
    let mut preimage = [0u8; 64];
    preimage[12..32].copy_from_slice(address.as_slice());
    preimage[32..64].copy_from_slice(slot.key().as_slice());
    keccak256(preimage)
}

/// Add `offset` to a storage key interpreted as a big-endian unsigned integer.
///
/// Fails instead of wrapping when the sum exceeds 2^256 - 1.
pub fn index_with_offset(base: B256, offset: u64) -> Result<B256> {
    U256::from_be_bytes(base.0)
        .checked_add(U256::from(offset))
        .map(u256_value)
        .ok_or(StakingGenesisError::SlotOverflow { base, offset })
}

/// Key of the first element of the dynamic array declared at `slot`.
pub fn array_base_key(slot: StorageSlot) -> B256 {
    keccak256(slot.key())
}

/// Key of element `index` of the dynamic array declared at `slot`.
pub fn array_element_key(slot: StorageSlot, index: u64) -> Result<B256> {
    index_with_offset(array_base_key(slot), index)
}

/// Parse a 20-byte address from a raw slice.
pub fn address_from_slice(bytes: &[u8]) -> Result<Address> {
    if bytes.len() != 20 {
        return Err(StakingGenesisError::InvalidAddressLength { len: bytes.len() });
    }
    Ok(Address::from_slice(bytes))
}

/// Encode an address as a storage value (left-padded).
pub fn address_value(address: &Address) -> B256 {
    address.into_word()
}

/// Encode a uint256 as a storage value.
pub fn u256_value(value: U256) -> B256 {
    B256::from(value.to_be_bytes::<32>())
}

/// Encode a uint64 as a storage value.
pub fn u64_value(value: u64) -> B256 {
    u256_value(U256::from(value))
}

/// Encode a bool as a storage value.
pub fn bool_value(value: bool) -> B256 {
    u64_value(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    #[test]
    fn test_slot_key_is_left_padded() {
        let key = StorageSlot::new(7).key();
        assert_eq!(key[..31], [0u8; 31]);
        assert_eq!(key[31], 7);
        assert_eq!(StorageSlot::new(0).key(), B256::ZERO);
    }

    #[test]
    fn test_negative_slot_rejected() {
        assert_eq!(
            StorageSlot::try_from(-1i64),
            Err(StakingGenesisError::NegativeSlot(-1))
        );
        assert_eq!(StorageSlot::try_from(5i64), Ok(StorageSlot::new(5)));
    }

    #[test]
    fn test_staking_contract_layout() {
        let layout = StakingLayout::default();
        let slots = [
            layout.validators,
            layout.is_validator,
            layout.staked_amount,
            layout.validator_index,
            layout.total_staked,
            layout.min_validators,
            layout.max_validators,
            layout.bls_public_key,
        ];
        for (expected, slot) in slots.iter().enumerate() {
            assert_eq!(slot.get(), expected as u64);
        }
    }

    #[test]
    fn test_array_base_known_answer() {
        // keccak256(pad32(0))
        assert_eq!(
            array_base_key(StorageSlot::new(0)),
            b256!("290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563")
        );
    }

    #[test]
    fn test_address_mapping_key_preimage() {
        let addr = address!("1111111111111111111111111111111111111111");
        let mut preimage = [0u8; 64];
        preimage[12..32].copy_from_slice(addr.as_slice());
        preimage[63] = 2;
        assert_eq!(
            address_mapping_key(&addr, StorageSlot::new(2)),
            keccak256(preimage)
        );
    }

    #[test]
    fn test_address_mapping_key_distinct() {
        let a = address!("1111111111111111111111111111111111111111");
        let b = address!("2222222222222222222222222222222222222222");
        let slot = StorageSlot::new(1);
        assert_ne!(address_mapping_key(&a, slot), address_mapping_key(&b, slot));
        assert_ne!(
            address_mapping_key(&a, slot),
            address_mapping_key(&a, StorageSlot::new(2))
        );
        assert_eq!(address_mapping_key(&a, slot), address_mapping_key(&a, slot));
    }

    #[test]
    fn test_index_with_offset_carries() {
        let base = b256!("00000000000000000000000000000000000000000000000000000000000000ff");
        assert_eq!(
            index_with_offset(base, 1).unwrap(),
            b256!("0000000000000000000000000000000000000000000000000000000000000100")
        );
        assert_eq!(index_with_offset(base, 0).unwrap(), base);
    }

    #[test]
    fn test_index_with_offset_overflow() {
        let max = B256::repeat_byte(0xff);
        assert_eq!(index_with_offset(max, 0).unwrap(), max);
        assert_eq!(
            index_with_offset(max, 1),
            Err(StakingGenesisError::SlotOverflow {
                base: max,
                offset: 1
            })
        );
    }

    #[test]
    fn test_address_from_slice() {
        assert!(address_from_slice(&[0x11; 20]).is_ok());
        assert_eq!(
            address_from_slice(&[0x11; 32]),
            Err(StakingGenesisError::InvalidAddressLength { len: 32 })
        );
    }

    #[test]
    fn test_value_encoding() {
        let addr = address!("1111111111111111111111111111111111111111");
        let value = address_value(&addr);
        assert_eq!(value[..12], [0u8; 12]);
        assert_eq!(&value[12..], addr.as_slice());

        assert_eq!(bool_value(true), u64_value(1));
        assert_eq!(
            u256_value(U256::from(0x8AC7230489E80000u64)),
            b256!("0000000000000000000000000000000000000000000000008ac7230489e80000")
        );
    }
}
