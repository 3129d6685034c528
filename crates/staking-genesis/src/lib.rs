//! Genesis storage for a pre-staked validator staking contract.
//!
//! Computes the storage keys and packed values the VM would have written had each
//! genesis validator staked through the contract, so the contract can be placed in
//! the genesis state with its validator set already populated:
//! - Mapping and dynamic array key derivation
//! - Dynamic `bytes` packing
//! - Per-validator storage entries and the full predeploy
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

/// Dynamic `bytes` storage encoding.
pub mod bytes;
/// Error types.
pub mod error;
/// Staking contract predeploy.
pub mod genesis;
/// Storage keys for a single validator.
pub mod indexes;
/// Ordered account storage.
pub mod map;
/// Read-back view over staking contract storage.
pub mod reader;
/// Storage layout and key derivation.
pub mod storage;
/// Genesis validators.
pub mod validator;

pub use bytes::{get_bytes_from_storage, set_bytes_to_storage};
pub use error::{Result, StakingGenesisError};
pub use genesis::{
    fold_validator, predeploy_staking_contract, validator_storage, PredeployParams,
    StakingAccount, DEFAULT_STAKED_BALANCE,
};
pub use indexes::StorageIndexes;
pub use map::StorageMap;
pub use reader::StakingStorageReader;
pub use storage::{
    address_mapping_key, array_base_key, array_element_key, index_with_offset, StakingLayout,
    StorageSlot,
};
pub use validator::{GenesisValidator, StakingValidator};
