use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    money::Money,
    policy::{AccountKind, AccountPolicy, CheckingPolicy, InterestRate, SavingsPolicy},
    transaction::{Transaction, TransactionKind},
    transfer::{self, TransferReceipt},
};

pub type AccountId = u32;
pub type UserId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },
    #[error("Withdrawal of {requested} exceeds the limit of {limit}")]
    LimitExceeded { requested: Money, limit: Money },
    #[error("Cannot transfer to the same account")]
    InvalidRecipient,
    #[error("{operation} is not supported for {kind} accounts")]
    UnsupportedOperation {
        operation: &'static str,
        kind: AccountKind,
    },
    #[error("Balance would overflow")]
    BalanceOverflow,
    #[error("Record belongs to account {got}, not {expected}")]
    ForeignRecord { expected: AccountId, got: AccountId },
}

/// A bank account held in memory while an operation runs on it.
///
/// The balance only changes through [`Account::apply`], which every mutating
/// operation goes through after its `handle_*` step has accepted the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    owner_id: UserId,
    balance: Money,
    policy: AccountPolicy,
}

impl Account {
    pub fn new(id: AccountId, owner_id: UserId, balance: Money, policy: AccountPolicy) -> Self {
        Self {
            id,
            owner_id,
            balance,
            policy,
        }
    }

    pub fn plain(id: AccountId, owner_id: UserId, balance: Money) -> Self {
        Self::new(id, owner_id, balance, AccountPolicy::Plain)
    }

    pub fn checking(id: AccountId, owner_id: UserId, balance: Money, limit: Money) -> Self {
        Self::new(
            id,
            owner_id,
            balance,
            AccountPolicy::Checking(CheckingPolicy::new(limit)),
        )
    }

    pub fn savings(id: AccountId, owner_id: UserId, balance: Money, rate: InterestRate) -> Self {
        Self::new(
            id,
            owner_id,
            balance,
            AccountPolicy::Savings(SavingsPolicy::new(rate)),
        )
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.policy.kind()
    }

    pub fn policy(&self) -> &AccountPolicy {
        &self.policy
    }

    pub fn withdrawal_limit(&self) -> Option<Money> {
        match &self.policy {
            AccountPolicy::Checking(policy) => Some(policy.withdrawal_limit()),
            AccountPolicy::Plain | AccountPolicy::Savings(_) => None,
        }
    }

    pub fn interest_rate(&self) -> Option<InterestRate> {
        match &self.policy {
            AccountPolicy::Savings(policy) => Some(policy.interest_rate()),
            AccountPolicy::Plain | AccountPolicy::Checking(_) => None,
        }
    }

    pub fn set_withdrawal_limit(&mut self, limit: Money) -> Result<(), AccountError> {
        let kind = self.kind();
        match &mut self.policy {
            AccountPolicy::Checking(policy) => {
                policy.set_withdrawal_limit(limit);
                Ok(())
            }
            AccountPolicy::Plain | AccountPolicy::Savings(_) => {
                Err(AccountError::UnsupportedOperation {
                    operation: "Withdrawal limit",
                    kind,
                })
            }
        }
    }

    /// Applies a record to the balance without any policy checks, so history
    /// can be replayed. Records of other accounts and debits larger than the
    /// balance are refused, and the balance stays as it was.
    pub fn apply(&mut self, record: &Transaction) -> Result<(), AccountError> {
        if record.account_id() != self.id {
            return Err(AccountError::ForeignRecord {
                expected: self.id,
                got: record.account_id(),
            });
        }
        let amount = record.amount();
        self.balance = if record.kind().is_debit() {
            self.balance
                .checked_sub(amount)
                .ok_or(AccountError::InsufficientFunds {
                    requested: amount,
                    available: self.balance,
                })?
        } else {
            self.balance
                .checked_add(amount)
                .ok_or(AccountError::BalanceOverflow)?
        };
        Ok(())
    }

    pub fn handle_deposit(&self, amount: Money) -> Result<Transaction, AccountError> {
        self.handle_credit(amount, TransactionKind::Deposit)
    }

    pub fn handle_withdrawal(&self, amount: Money) -> Result<Transaction, AccountError> {
        self.handle_debit(amount, TransactionKind::Withdrawal)
    }

    pub fn handle_interest(&self) -> Result<Transaction, AccountError> {
        let AccountPolicy::Savings(policy) = &self.policy else {
            return Err(AccountError::UnsupportedOperation {
                operation: "Interest",
                kind: self.kind(),
            });
        };
        let interest = policy
            .interest_on(self.balance)
            .ok_or(AccountError::BalanceOverflow)?;
        if self.balance.checked_add(interest).is_none() {
            return Err(AccountError::BalanceOverflow);
        }
        Ok(Transaction::new(self.id, TransactionKind::Interest, interest))
    }

    pub(crate) fn handle_credit(
        &self,
        amount: Money,
        kind: TransactionKind,
    ) -> Result<Transaction, AccountError> {
        if !amount.is_positive() {
            return Err(AccountError::InvalidAmount);
        }
        // deposits are never limit-checked, whatever the account kind
        if self.balance.checked_add(amount).is_none() {
            return Err(AccountError::BalanceOverflow);
        }
        Ok(Transaction::new(self.id, kind, amount))
    }

    pub(crate) fn handle_debit(
        &self,
        amount: Money,
        kind: TransactionKind,
    ) -> Result<Transaction, AccountError> {
        if !amount.is_positive() {
            return Err(AccountError::InvalidAmount);
        }
        match &self.policy {
            AccountPolicy::Checking(policy) => policy.check_withdrawal(amount)?,
            AccountPolicy::Plain | AccountPolicy::Savings(_) => {}
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(Transaction::new(self.id, kind, amount))
    }

    pub fn deposit(&mut self, amount: Money) -> Result<Transaction, AccountError> {
        let record = self.handle_deposit(amount)?;
        self.apply(&record)?;
        Ok(record)
    }

    pub fn withdraw(&mut self, amount: Money) -> Result<Transaction, AccountError> {
        let record = self.handle_withdrawal(amount)?;
        self.apply(&record)?;
        Ok(record)
    }

    /// Compounds: every call accrues on the balance left by the previous one.
    pub fn apply_interest(&mut self) -> Result<Transaction, AccountError> {
        let record = self.handle_interest()?;
        self.apply(&record)?;
        Ok(record)
    }

    pub fn transfer(
        &mut self,
        recipient: &mut Account,
        amount: Money,
    ) -> Result<TransferReceipt, AccountError> {
        transfer::transfer(self, recipient, amount)
    }
}
