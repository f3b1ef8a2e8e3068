use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountId, UserId},
    command::{AccountCommand, AccountCommandError},
    transaction::Transaction,
};

pub mod in_memory_processor;

/// Holder of one or more accounts. Accounts refer to it by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub card_number: String,
    pub account_ids: Vec<AccountId>,
}

impl User {
    /// A user known only by id, as registered when their first account opens.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: String::new(),
            card_number: String::new(),
            account_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("User {0} not found")]
    UserNotFound(UserId),
    #[error("Account {0} already exists")]
    DuplicateAccount(AccountId),
}

#[derive(Debug, Error)]
pub enum TransactionProcessError {
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    StoreErr(#[from] StoreError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Where accounts come from and go back to. The account core never calls
/// this itself; a processor loads, runs the operation, then saves.
pub trait AccountRepository {
    fn load_account(&self, account_id: AccountId) -> Result<Account, StoreError>;

    fn load_user(&self, user_id: UserId) -> Result<User, StoreError>;

    fn save_account(&mut self, account: &Account) -> Result<(), StoreError>;
}

/// Append-only store of the records emitted by completed operations.
pub trait TransactionLog {
    fn record(&mut self, transaction: Transaction);

    /// Records of one account, oldest first.
    fn list_transactions(&self, account_id: AccountId) -> Vec<Transaction>;
}

pub trait TransactionProcessor {
    fn process(
        &mut self,
        command: AccountCommand,
    ) -> Result<Vec<Transaction>, TransactionProcessError>;
}
