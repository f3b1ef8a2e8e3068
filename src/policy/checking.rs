use serde::{Deserialize, Serialize};

use crate::{account::AccountError, money::Money};

/// Ceiling on any single withdrawal from a checking account.
///
/// The limit is checked before the balance, so a request over the limit is
/// reported as [`AccountError::LimitExceeded`] even when funds would cover it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckingPolicy {
    withdrawal_limit: Money,
}

impl CheckingPolicy {
    pub fn new(withdrawal_limit: Money) -> Self {
        Self { withdrawal_limit }
    }

    pub fn withdrawal_limit(&self) -> Money {
        self.withdrawal_limit
    }

    pub fn set_withdrawal_limit(&mut self, limit: Money) {
        self.withdrawal_limit = limit;
    }

    pub fn check_withdrawal(&self, amount: Money) -> Result<(), AccountError> {
        if amount > self.withdrawal_limit {
            return Err(AccountError::LimitExceeded {
                requested: amount,
                limit: self.withdrawal_limit,
            });
        }
        Ok(())
    }
}
