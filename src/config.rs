//! Defaults applied when the bank opens new accounts.
//!
//! Values come from the environment; a `.env` file is honoured by the binary.

use crate::{
    money::{Money, MoneyError},
    policy::InterestRate,
};

pub const SAVINGS_INTEREST_RATE: &str = "SAVINGS_INTEREST_RATE";
pub const CHECKING_WITHDRAWAL_LIMIT: &str = "CHECKING_WITHDRAWAL_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    /// Rate given to every savings account at opening. Accounts keep the rate
    /// they were opened with.
    pub savings_interest_rate: InterestRate,

    /// Limit for checking accounts opened without an explicit one.
    pub checking_withdrawal_limit: Money,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            savings_interest_rate: InterestRate::default(),
            checking_withdrawal_limit: Money::from(1000),
        }
    }
}

impl BankConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`BankConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let savings_interest_rate = match lookup(SAVINGS_INTEREST_RATE) {
            Some(value) => value
                .parse::<InterestRate>()
                .map_err(|source| ConfigError::InvalidValue {
                    name: SAVINGS_INTEREST_RATE,
                    source,
                })?,
            None => defaults.savings_interest_rate,
        };

        let checking_withdrawal_limit = match lookup(CHECKING_WITHDRAWAL_LIMIT) {
            Some(value) => value
                .parse::<Money>()
                .map_err(|source| ConfigError::InvalidValue {
                    name: CHECKING_WITHDRAWAL_LIMIT,
                    source,
                })?,
            None => defaults.checking_withdrawal_limit,
        };

        Ok(Self {
            savings_interest_rate,
            checking_withdrawal_limit,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {source}")]
    InvalidValue {
        name: &'static str,
        #[source]
        source: MoneyError,
    },
}
