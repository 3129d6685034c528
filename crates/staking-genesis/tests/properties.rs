//! Property-based tests for storage key derivation and byte packing.

use alloy_primitives::{keccak256, Address, B256, U256};
use proptest::prelude::*;
use staking_genesis::{
    address_mapping_key, get_bytes_from_storage, index_with_offset, set_bytes_to_storage,
    StorageMap, StorageSlot,
};

proptest! {
    /// Property: offset zero is the identity.
    #[test]
    fn prop_offset_identity(hash in any::<[u8; 32]>()) {
        let hash = B256::from(hash);
        prop_assert_eq!(index_with_offset(hash, 0).unwrap(), hash);
    }

    /// Property: each offset step is the successor of the previous one.
    #[test]
    fn prop_offset_successor(seed in any::<[u8; 32]>(), n in 1u64..10_000) {
        let hash = keccak256(seed);
        let prev = U256::from_be_bytes(index_with_offset(hash, n - 1).unwrap().0);
        let next = U256::from_be_bytes(index_with_offset(hash, n).unwrap().0);
        prop_assert_eq!(next, prev + U256::from(1));
    }

    /// Property: distinct (address, slot) pairs derive distinct keys.
    #[test]
    fn prop_mapping_key_injective(
        a in any::<[u8; 20]>(),
        b in any::<[u8; 20]>(),
        s in 0u64..64,
        t in 0u64..64,
    ) {
        prop_assume!(a != b || s != t);
        prop_assert_ne!(
            address_mapping_key(&Address::from(a), StorageSlot::new(s)),
            address_mapping_key(&Address::from(b), StorageSlot::new(t))
        );
    }

    /// Property: packed byte strings decode to the original payload.
    #[test]
    fn prop_bytes_roundtrip(
        base in any::<[u8; 32]>(),
        data in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let base = B256::from(base);
        let mut storage = StorageMap::new();
        set_bytes_to_storage(&mut storage, base, &data).unwrap();

        let header = storage.get(&base);
        if data.len() <= 31 {
            prop_assert_eq!(header[31] % 2, 0);
            prop_assert_eq!((header[31] / 2) as usize, data.len());
        } else {
            let header = U256::from_be_bytes(header.0);
            prop_assert_eq!((header - U256::from(1)) / U256::from(2), U256::from(data.len()));
        }

        prop_assert_eq!(get_bytes_from_storage(&storage, base).unwrap().to_vec(), data);
    }

    /// Property: packing the same payload twice is idempotent.
    #[test]
    fn prop_bytes_repack_same_payload(
        data in proptest::collection::vec(any::<u8>(), 0..100),
    ) {
        let base = B256::repeat_byte(0x5c);
        let mut once = StorageMap::new();
        set_bytes_to_storage(&mut once, base, &data).unwrap();
        let mut twice = once.clone();
        set_bytes_to_storage(&mut twice, base, &data).unwrap();
        prop_assert_eq!(once, twice);
    }
}
