//! Block gas budget

use crate::error::GasPoolError;
use std::fmt;

/// Gas still available to the transactions of a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasPool(u64);

impl GasPool {
    /// Pool holding `gas`
    pub fn new(gas: u64) -> Self {
        Self(gas)
    }

    /// Gas left
    pub fn gas(&self) -> u64 {
        self.0
    }

    /// Check that `amount` is available without taking it
    pub fn ensure(&self, amount: u64) -> Result<(), GasPoolError> {
        if self.0 < amount {
            return Err(GasPoolError::GasLimitReached {
                available: self.0,
                requested: amount,
            });
        }
        Ok(())
    }

    /// Take `amount`; the pool is unchanged on failure
    pub fn sub_gas(&mut self, amount: u64) -> Result<(), GasPoolError> {
        self.ensure(amount)?;
        self.0 -= amount;
        Ok(())
    }
}

impl fmt::Display for GasPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sub_gas() {
        let mut pool = GasPool::new(100);
        pool.sub_gas(40).unwrap();
        assert_eq!(pool.gas(), 60);
        pool.sub_gas(60).unwrap();
        assert_eq!(pool.gas(), 0);
    }

    #[test]
    fn test_failed_sub_leaves_pool() {
        let mut pool = GasPool::new(10);
        let err = pool.sub_gas(11).unwrap_err();
        assert_eq!(
            err,
            GasPoolError::GasLimitReached {
                available: 10,
                requested: 11
            }
        );
        assert_eq!(pool.gas(), 10);
        assert_eq!(pool.to_string(), "10");
    }

    proptest! {
        #[test]
        fn prop_pool_never_underflows(start in 0u64..1_000_000, takes in prop::collection::vec(0u64..200_000, 0..20)) {
            let mut pool = GasPool::new(start);
            let mut expected = start;
            for take in takes {
                match pool.sub_gas(take) {
                    Ok(()) => expected -= take,
                    Err(_) => prop_assert!(take > expected),
                }
                prop_assert_eq!(pool.gas(), expected);
            }
        }
    }
}
