//! Storage keys touched by a single pre-staked validator.

use crate::{
    error::Result,
    storage::{address_mapping_key, array_element_key, StakingLayout},
};
use alloy_primitives::{Address, B256};

/// Storage keys that need to be written for one validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageIndexes {
    /// `validators[index]`
    pub validators: B256,
    /// `addressToIsValidator[address]`
    pub is_validator: B256,
    /// `addressToStakedAmount[address]`
    pub staked_amount: B256,
    /// `addressToValidatorIndex[address]`
    pub validator_index: B256,
    /// `addressToBLSPublicKey[address]`, the header slot of a `bytes` value
    pub bls_public_key: B256,
}

impl StorageIndexes {
    /// Resolve the keys for the validator at position `index` of the validator set.
    pub fn resolve(address: &Address, index: u64, layout: &StakingLayout) -> Result<Self> {
        Ok(Self {
            validators: array_element_key(layout.validators, index)?,
            is_validator: address_mapping_key(address, layout.is_validator),
            staked_amount: address_mapping_key(address, layout.staked_amount),
            validator_index: address_mapping_key(address, layout.validator_index),
            bls_public_key: address_mapping_key(address, layout.bls_public_key),
        })
    }

    /// The per-address mapping keys, in layout order.
    pub fn mapping_keys(&self) -> [B256; 4] {
        [
            self.is_validator,
            self.staked_amount,
            self.validator_index,
            self.bls_public_key,
        ]
    }
}
