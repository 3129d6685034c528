//! Errors raised while laying out the staking contract's genesis storage.
//!
//! Every variant is fatal: the computation is pure, so nothing here is
//! transient and nothing is retried. Callers surface these as startup
//! configuration errors.

use alloy_primitives::B256;

/// Result alias for staking genesis operations.
pub type Result<T> = core::result::Result<T, StakingGenesisError>;

/// Error type for staking genesis storage construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StakingGenesisError {
    /// An address was not exactly 20 bytes long.
    #[error("invalid address length: expected 20 bytes, got {len}")]
    InvalidAddressLength {
        /// Length of the rejected input.
        len: usize,
    },

    /// A storage slot number was negative.
    #[error("storage slot must be non-negative, got {0}")]
    NegativeSlot(i64),

    /// Adding an offset to a storage key carried past 2^256 - 1.
    #[error("storage key {base} + {offset} overflows 256 bits")]
    SlotOverflow {
        /// Base key the offset was applied to.
        base: B256,
        /// Offset that caused the carry.
        offset: u64,
    },

    /// The accumulated staked balance no longer fits in 256 bits.
    #[error("total staked balance overflows 256 bits after {validators} validators")]
    BalanceOverflow {
        /// Number of validators summed before the overflow.
        validators: usize,
    },

    /// The validator count bounds are inconsistent with each other or with the set.
    #[error("invalid validator bounds: min {min}, max {max}, count {count}")]
    InvalidValidatorBounds {
        /// Configured minimum validator count.
        min: u64,
        /// Configured maximum validator count.
        max: u64,
        /// Number of validators being predeployed.
        count: u64,
    },

    /// A dynamic byte string header does not describe a valid encoding.
    #[error("malformed byte string encoding at {key}")]
    MalformedBytes {
        /// Key of the header slot.
        key: B256,
    },

    /// A storage value claims an entry that was never written.
    #[error("missing storage entry at {key}")]
    MissingStorage {
        /// Key expected to be present.
        key: B256,
    },

    /// Two distinct entries resolved to the same storage key.
    #[error("storage key collision at {key}")]
    KeyCollision {
        /// The key written twice.
        key: B256,
    },
}

impl StakingGenesisError {
    /// Returns `true` if the error is caused by malformed caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddressLength { .. }
                | Self::NegativeSlot(_)
                | Self::SlotOverflow { .. }
                | Self::BalanceOverflow { .. }
                | Self::InvalidValidatorBounds { .. }
                | Self::MalformedBytes { .. }
                | Self::MissingStorage { .. }
        )
    }

    /// Returns `true` if the error indicates an addressing bug in the storage schema.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::KeyCollision { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let collision = StakingGenesisError::KeyCollision { key: B256::ZERO };
        assert!(collision.is_schema_violation());
        assert!(!collision.is_invalid_input());

        let input_errors = [
            StakingGenesisError::InvalidAddressLength { len: 19 },
            StakingGenesisError::NegativeSlot(-1),
            StakingGenesisError::SlotOverflow {
                base: B256::ZERO,
                offset: 1,
            },
            StakingGenesisError::BalanceOverflow { validators: 2 },
            StakingGenesisError::InvalidValidatorBounds {
                min: 2,
                max: 1,
                count: 0,
            },
            StakingGenesisError::MalformedBytes { key: B256::ZERO },
            StakingGenesisError::MissingStorage { key: B256::ZERO },
        ];
        for err in input_errors {
            assert!(err.is_invalid_input(), "{err}");
            assert!(!err.is_schema_violation(), "{err}");
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StakingGenesisError::InvalidAddressLength { len: 19 }.to_string(),
            "invalid address length: expected 20 bytes, got 19"
        );
        assert_eq!(
            StakingGenesisError::NegativeSlot(-3).to_string(),
            "storage slot must be non-negative, got -3"
        );
    }
}
