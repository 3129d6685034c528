//! Validators pre-staked at genesis.

use crate::{error::Result, storage::address_from_slice};
use alloy_primitives::{Address, Bytes};

/// A validator the staking contract should know about at genesis.
///
/// Only the signer address is required. Validators that also carry a BLS public key
/// get it written to the contract's key registry.
pub trait StakingValidator {
    /// Address the validator stakes from.
    fn address(&self) -> Address;

    /// BLS public key, if this kind of validator has one.
    fn bls_public_key(&self) -> Option<&[u8]> {
        None
    }
}

impl StakingValidator for Address {
    fn address(&self) -> Address {
        *self
    }
}

impl<T: StakingValidator + ?Sized> StakingValidator for &T {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn bls_public_key(&self) -> Option<&[u8]> {
        (**self).bls_public_key()
    }
}

/// Validator entry as it appears in a genesis file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GenesisValidator {
    /// Signer address.
    pub address: Address,
    /// Optional BLS public key.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub bls_public_key: Option<Bytes>,
}

impl GenesisValidator {
    /// Validator identified by its address only.
    pub const fn new(address: Address) -> Self {
        Self {
            address,
            bls_public_key: None,
        }
    }

    /// Validator from a raw address slice, which must be exactly 20 bytes.
    pub fn from_slice(address: &[u8]) -> Result<Self> {
        address_from_slice(address).map(Self::new)
    }

    /// Attach a BLS public key.
    pub fn with_bls_public_key(mut self, key: impl Into<Bytes>) -> Self {
        self.bls_public_key = Some(key.into());
        self
    }
}

impl StakingValidator for GenesisValidator {
    fn address(&self) -> Address {
        self.address
    }

    fn bls_public_key(&self) -> Option<&[u8]> {
        self.bls_public_key.as_ref().map(|key| &key[..])
    }
}
