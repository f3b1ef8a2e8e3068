use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{account::AccountId, money::Money};

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferOut,
    TransferIn,
    Interest,
}

impl TransactionKind {
    /// Whether applying this kind takes value out of the account.
    pub fn is_debit(self) -> bool {
        matches!(self, Self::Withdrawal | Self::TransferOut)
    }
}

/// Immutable record of one completed balance mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    transaction_id: TransactionId,
    account_id: AccountId,
    kind: TransactionKind,
    amount: Money,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(account_id: AccountId, kind: TransactionKind, amount: Money) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            account_id,
            kind,
            amount,
            timestamp: Utc::now(),
        }
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
