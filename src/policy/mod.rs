use std::fmt;

use serde::{Deserialize, Serialize};

pub mod checking;
pub mod savings;

pub use checking::CheckingPolicy;
pub use savings::{InterestRate, SavingsPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Plain,
    Checking,
    Savings,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountKind::Plain => "plain",
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
        };
        f.write_str(name)
    }
}

/// Kind-specific state of an account. The variant is chosen when the account
/// is opened and nothing replaces it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountPolicy {
    Plain,
    Checking(CheckingPolicy),
    Savings(SavingsPolicy),
}

impl AccountPolicy {
    pub fn kind(&self) -> AccountKind {
        match self {
            AccountPolicy::Plain => AccountKind::Plain,
            AccountPolicy::Checking(_) => AccountKind::Checking,
            AccountPolicy::Savings(_) => AccountKind::Savings,
        }
    }
}
