use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{Money, MoneyError};

/// Fractional multiplier applied to a balance, `0.1` meaning ten percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct InterestRate(Decimal);

impl InterestRate {
    pub fn new(rate: Decimal) -> Result<Self, MoneyError> {
        if rate.is_sign_negative() && !rate.is_zero() {
            return Err(MoneyError::Negative(rate));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Ten percent, the rate savings accounts are opened with unless configured
/// otherwise.
impl Default for InterestRate {
    fn default() -> Self {
        Self(Decimal::new(1, 1))
    }
}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for InterestRate {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rate = Decimal::from_str(s.trim()).map_err(|err| MoneyError::Parse(err.to_string()))?;
        InterestRate::new(rate)
    }
}

impl TryFrom<Decimal> for InterestRate {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        InterestRate::new(value)
    }
}

impl From<InterestRate> for Decimal {
    fn from(rate: InterestRate) -> Self {
        rate.0
    }
}

/// Interest accrual for savings accounts. Each account carries its own rate,
/// fixed when the account is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsPolicy {
    interest_rate: InterestRate,
}

impl SavingsPolicy {
    pub fn new(interest_rate: InterestRate) -> Self {
        Self { interest_rate }
    }

    pub fn interest_rate(&self) -> InterestRate {
        self.interest_rate
    }

    /// Interest accrued on `balance`, not rounded. `None` on overflow.
    pub fn interest_on(&self, balance: Money) -> Option<Money> {
        balance
            .value()
            .checked_mul(self.interest_rate.0)
            .and_then(|interest| Money::new(interest).ok())
    }
}
