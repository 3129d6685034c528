//! Staking contract predeploy.
//!
//! Builds the storage of the staking contract account so that, at chain start, it
//! looks exactly as if every genesis validator had called `stake()` with the default
//! amount, in order. The contract bytecode is carried through untouched.
//!
//! # Storage written
//!
//! ```text
//! Slot 0: validators.length
//! Slot 4: total staked amount
//! Slot 5: minimum number of validators
//! Slot 6: maximum number of validators
//! keccak256(pad32(0)) + i:    validators[i] = address
//! keccak256(addr . pad32(1)): addressToIsValidator[addr] = true
//! keccak256(addr . pad32(2)): addressToStakedAmount[addr] = staked balance
//! keccak256(addr . pad32(3)): addressToValidatorIndex[addr] = i
//! keccak256(addr . pad32(7)): addressToBLSPublicKey[addr] = key bytes (BLS validators only)
//! ```
//!
//! Each validator's entries are computed independently and merged into the
//! accumulated map. A key written by two different entries aborts the build.

use crate::{
    bytes::set_bytes_to_storage,
    error::{Result, StakingGenesisError},
    indexes::StorageIndexes,
    map::StorageMap,
    storage::{address_value, bool_value, u256_value, u64_value, StakingLayout},
    validator::StakingValidator,
};
use alloy_primitives::{Bytes, U256};
use tracing::{debug, info};

/// Amount every genesis validator is considered to have staked: 10 ether (0x8AC7230489E80000).
pub const DEFAULT_STAKED_BALANCE: U256 = U256::from_limbs([0x8AC7_2304_89E8_0000, 0, 0, 0]);

/// Default minimum number of validators.
pub const DEFAULT_MIN_VALIDATOR_COUNT: u64 = 1;

/// Default maximum number of validators: the largest integer a JSON number holds exactly.
pub const DEFAULT_MAX_VALIDATOR_COUNT: u64 = (1 << 53) - 1;

/// Values used to predeploy the staking contract.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PredeployParams {
    /// Minimum number of validators the contract allows.
    pub min_validator_count: u64,
    /// Maximum number of validators the contract allows.
    pub max_validator_count: u64,
    /// Stake recorded for each genesis validator.
    pub staked_balance: U256,
    /// Storage layout of the contract being predeployed.
    pub layout: StakingLayout,
    /// Runtime bytecode of the staking contract.
    pub code: Bytes,
}

impl Default for PredeployParams {
    fn default() -> Self {
        Self {
            min_validator_count: DEFAULT_MIN_VALIDATOR_COUNT,
            max_validator_count: DEFAULT_MAX_VALIDATOR_COUNT,
            staked_balance: DEFAULT_STAKED_BALANCE,
            layout: StakingLayout::STAKING_CONTRACT,
            code: Bytes::new(),
        }
    }
}

impl PredeployParams {
    /// Set the validator count bounds.
    pub fn with_validator_bounds(mut self, min: u64, max: u64) -> Self {
        self.min_validator_count = min;
        self.max_validator_count = max;
        self
    }

    /// Set the stake recorded for each validator.
    pub fn with_staked_balance(mut self, staked_balance: U256) -> Self {
        self.staked_balance = staked_balance;
        self
    }

    /// Set the contract bytecode.
    pub fn with_code(mut self, code: impl Into<Bytes>) -> Self {
        self.code = code.into();
        self
    }

    /// Set the storage layout.
    pub fn with_layout(mut self, layout: StakingLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Check that `count` validators can be predeployed with these bounds.
    pub fn validate(&self, count: u64) -> Result<()> {
        if self.min_validator_count > self.max_validator_count || count > self.max_validator_count
        {
            return Err(StakingGenesisError::InvalidValidatorBounds {
                min: self.min_validator_count,
                max: self.max_validator_count,
                count,
            });
        }
        Ok(())
    }
}

/// Genesis account of the staking contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StakingAccount {
    /// Contract bytecode.
    pub code: Bytes,
    /// Contract storage.
    pub storage: StorageMap,
    /// Account balance, the sum of all genesis stakes.
    pub balance: U256,
}

/// Storage entries contributed by the validator at position `index`.
///
/// Pure: entries for different validators can be computed independently and merged.
pub fn validator_storage<V: StakingValidator + ?Sized>(
    index: u64,
    validator: &V,
    params: &PredeployParams,
) -> Result<StorageMap> {
    let address = validator.address();
    let indexes = StorageIndexes::resolve(&address, index, &params.layout)?;

    let mut storage = StorageMap::new();
    storage.insert_unique(indexes.validators, address_value(&address))?;
    storage.insert_unique(indexes.is_validator, bool_value(true))?;
    storage.insert_unique(indexes.staked_amount, u256_value(params.staked_balance))?;
    storage.insert_unique(indexes.validator_index, u64_value(index))?;

    if let Some(key) = validator.bls_public_key() {
        let mut bls = StorageMap::new();
        set_bytes_to_storage(&mut bls, indexes.bls_public_key, key)?;
        storage.merge(bls)?;
    }

    Ok(storage)
}

/// Fold one validator into the accumulated storage.
pub fn fold_validator<V: StakingValidator + ?Sized>(
    mut storage: StorageMap,
    index: u64,
    validator: &V,
    params: &PredeployParams,
) -> Result<StorageMap> {
    storage.merge(validator_storage(index, validator, params)?)?;
    Ok(storage)
}

/// Build the staking contract account with `validators` already staked, in order.
pub fn predeploy_staking_contract<V: StakingValidator>(
    validators: &[V],
    params: &PredeployParams,
) -> Result<StakingAccount> {
    let count = validators.len() as u64;
    params.validate(count)?;

    let mut total_staked = U256::ZERO;
    let mut storage = StorageMap::new();
    for (index, validator) in validators.iter().enumerate() {
        total_staked = total_staked
            .checked_add(params.staked_balance)
            .ok_or(StakingGenesisError::BalanceOverflow { validators: index })?;

        debug!(
            index,
            address = %validator.address(),
            bls = validator.bls_public_key().is_some(),
            "Pre-staking genesis validator"
        );
        storage = fold_validator(storage, index as u64, validator, params)?;
    }

    let layout = &params.layout;
    storage.insert_unique(layout.validators.key(), u64_value(count))?;
    storage.insert_unique(layout.total_staked.key(), u256_value(total_staked))?;
    storage.insert_unique(
        layout.min_validators.key(),
        u64_value(params.min_validator_count),
    )?;
    storage.insert_unique(
        layout.max_validators.key(),
        u64_value(params.max_validator_count),
    )?;

    info!(
        validators = count,
        total_staked = %total_staked,
        slots = storage.len(),
        "Staking contract predeployed"
    );

    Ok(StakingAccount {
        code: params.code.clone(),
        storage,
        balance: total_staked,
    })
}
