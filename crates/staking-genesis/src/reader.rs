//! Read-back view over staking contract storage.
//!
//! Decodes values the same way the contract's getters would, which lets genesis
//! tooling check a produced storage map without running the VM.

use crate::{
    bytes::get_bytes_from_storage,
    error::{Result, StakingGenesisError},
    map::StorageMap,
    storage::{address_mapping_key, array_element_key, StakingLayout, StorageSlot},
};
use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes, B256, U256};

/// Typed reads over the staking contract's storage.
#[derive(Clone, Copy, Debug)]
pub struct StakingStorageReader<'a> {
    storage: &'a StorageMap,
    layout: &'a StakingLayout,
}

impl<'a> StakingStorageReader<'a> {
    /// Create a reader over `storage` laid out as `layout`.
    pub fn new(storage: &'a StorageMap, layout: &'a StakingLayout) -> Self {
        Self { storage, layout }
    }

    /// `validators.length`
    pub fn validator_count(&self) -> U256 {
        self.read_u256(self.layout.validators.key())
    }

    /// `stakedAmount`
    pub fn total_staked(&self) -> U256 {
        self.read_u256(self.layout.total_staked.key())
    }

    /// `minimumNumValidators`
    pub fn min_validators(&self) -> U256 {
        self.read_u256(self.layout.min_validators.key())
    }

    /// `maximumNumValidators`
    pub fn max_validators(&self) -> U256 {
        self.read_u256(self.layout.max_validators.key())
    }

    /// `validators[index]`
    pub fn validator_at(&self, index: u64) -> Result<Address> {
        let key = array_element_key(self.layout.validators, index)?;
        Ok(Address::from_word(self.storage.get(&key)))
    }

    /// All entries of the `validators` array, in order.
    ///
    /// Fails if the stored length claims an element that was never written.
    pub fn validators(&self) -> Result<Vec<Address>> {
        let count: u64 = self.validator_count().saturating_to();
        let mut validators = Vec::new();
        for index in 0..count {
            let key = array_element_key(self.layout.validators, index)?;
            if !self.storage.contains_key(&key) {
                return Err(StakingGenesisError::MissingStorage { key });
            }
            validators.push(Address::from_word(self.storage.get(&key)));
        }
        Ok(validators)
    }

    /// `addressToIsValidator[address]`
    pub fn is_validator(&self, address: &Address) -> bool {
        !self
            .read_mapping(address, self.layout.is_validator)
            .is_zero()
    }

    /// `addressToStakedAmount[address]`
    pub fn staked_amount(&self, address: &Address) -> U256 {
        self.read_mapping(address, self.layout.staked_amount)
    }

    /// `addressToValidatorIndex[address]`
    pub fn validator_index(&self, address: &Address) -> U256 {
        self.read_mapping(address, self.layout.validator_index)
    }

    /// `addressToBLSPublicKey[address]`
    pub fn bls_public_key(&self, address: &Address) -> Result<Bytes> {
        get_bytes_from_storage(
            self.storage,
            address_mapping_key(address, self.layout.bls_public_key),
        )
    }

    fn read_mapping(&self, address: &Address, slot: StorageSlot) -> U256 {
        self.read_u256(address_mapping_key(address, slot))
    }

    fn read_u256(&self, key: B256) -> U256 {
        U256::from_be_bytes(self.storage.get(&key).0)
    }
}
