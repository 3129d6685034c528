//! Ordered storage map of a single account.

use crate::error::{Result, StakingGenesisError};
use alloy_primitives::B256;
use alloc::collections::{btree_map, BTreeMap};

/// Key/value storage of one account, ordered by key.
///
/// Absent keys read as zero, as they do in the VM.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StorageMap(BTreeMap<B256, B256>);

impl StorageMap {
    /// Creates an empty storage map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored at `key`, or zero when unset.
    pub fn get(&self, key: &B256) -> B256 {
        self.0.get(key).copied().unwrap_or_default()
    }

    /// Returns `true` if `key` has been written.
    pub fn contains_key(&self, key: &B256) -> bool {
        self.0.contains_key(key)
    }

    /// Writes `value` at `key`, overwriting any previous value.
    pub fn insert(&mut self, key: B256, value: B256) -> Option<B256> {
        self.0.insert(key, value)
    }

    /// Writes `value` at `key`, failing if the key is already occupied.
    pub fn insert_unique(&mut self, key: B256, value: B256) -> Result<()> {
        match self.0.entry(key) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
            btree_map::Entry::Occupied(_) => Err(StakingGenesisError::KeyCollision { key }),
        }
    }

    /// Moves every entry of `other` into `self`.
    ///
    /// Any key present in both maps is a collision; `self` is left untouched in that case.
    pub fn merge(&mut self, other: StorageMap) -> Result<()> {
        if let Some(key) = other.0.keys().find(|key| self.0.contains_key(*key)) {
            return Err(StakingGenesisError::KeyCollision { key: *key });
        }
        self.0.extend(other.0);
        Ok(())
    }

    /// Number of written keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, B256, B256> {
        self.0.iter()
    }

    /// Consumes the map, returning the underlying entries.
    pub fn into_inner(self) -> BTreeMap<B256, B256> {
        self.0
    }
}

impl From<BTreeMap<B256, B256>> for StorageMap {
    fn from(map: BTreeMap<B256, B256>) -> Self {
        Self(map)
    }
}

impl IntoIterator for StorageMap {
    type Item = (B256, B256);
    type IntoIter = btree_map::IntoIter<B256, B256>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StorageMap {
    type Item = (&'a B256, &'a B256);
    type IntoIter = btree_map::Iter<'a, B256, B256>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
