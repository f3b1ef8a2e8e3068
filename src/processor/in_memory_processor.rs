use std::collections::{HashMap, hash_map::Entry};

use crate::{
    account::{Account, AccountId, UserId},
    command::AccountCommand,
    config::BankConfig,
    money::Money,
    policy::AccountKind,
    transaction::Transaction,
};

use super::{
    AccountRepository, StoreError, TransactionLog, TransactionProcessError, TransactionProcessor,
    User,
};

#[derive(Default)]
pub struct InMemoryBank {
    config: BankConfig,
    accounts: HashMap<AccountId, Account>,
    users: HashMap<UserId, User>,
    transactions: Vec<Transaction>,
}

impl InMemoryBank {
    pub fn new(config: BankConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Adds a new account and links it to its owner, registering the owner on
    /// first sight.
    pub fn open_account(&mut self, account: Account) -> Result<(), StoreError> {
        let Entry::Vacant(entry) = self.accounts.entry(account.id()) else {
            return Err(StoreError::DuplicateAccount(account.id()));
        };
        let owner_id = account.owner_id();
        let account_id = account.id();
        entry.insert(account);
        self.users
            .entry(owner_id)
            .or_insert_with(|| User::new(owner_id))
            .account_ids
            .push(account_id);
        Ok(())
    }

    /// Stores the owner's details. Accounts already linked to the user stay
    /// linked.
    pub fn register_user(&mut self, user_id: UserId, username: String, card_number: String) {
        let user = self
            .users
            .entry(user_id)
            .or_insert_with(|| User::new(user_id));
        user.username = username;
        user.card_number = card_number;
    }

    fn new_account(
        &self,
        account_id: AccountId,
        owner_id: UserId,
        kind: AccountKind,
        withdrawal_limit: Option<Money>,
    ) -> Account {
        match kind {
            AccountKind::Plain => Account::plain(account_id, owner_id, Money::ZERO),
            AccountKind::Checking => Account::checking(
                account_id,
                owner_id,
                Money::ZERO,
                withdrawal_limit.unwrap_or(self.config.checking_withdrawal_limit),
            ),
            AccountKind::Savings => Account::savings(
                account_id,
                owner_id,
                Money::ZERO,
                self.config.savings_interest_rate,
            ),
        }
    }

    fn execute(
        &mut self,
        command: AccountCommand,
    ) -> Result<Vec<Transaction>, TransactionProcessError> {
        let records = match command {
            AccountCommand::Open {
                account_id,
                owner_id,
                kind,
                withdrawal_limit,
            } => {
                let account = self.new_account(account_id, owner_id, kind, withdrawal_limit);
                self.open_account(account)?;
                Vec::new()
            }
            AccountCommand::Deposit { account_id, amount } => {
                let mut account = self.load_account(account_id)?;
                let record = account.deposit(amount)?;
                self.save_account(&account)?;
                vec![record]
            }
            AccountCommand::Withdraw { account_id, amount } => {
                let mut account = self.load_account(account_id)?;
                let record = account.withdraw(amount)?;
                self.save_account(&account)?;
                vec![record]
            }
            AccountCommand::Transfer { from, to, amount } => {
                let mut sender = self.load_account(from)?;
                let mut recipient = self.load_account(to)?;
                let receipt = sender.transfer(&mut recipient, amount)?;
                self.save_account(&sender)?;
                self.save_account(&recipient)?;
                vec![receipt.debit, receipt.credit]
            }
            AccountCommand::ApplyInterest { account_id } => {
                let mut account = self.load_account(account_id)?;
                let record = account.apply_interest()?;
                self.save_account(&account)?;
                vec![record]
            }
            AccountCommand::SetWithdrawalLimit { account_id, limit } => {
                let mut account = self.load_account(account_id)?;
                account.set_withdrawal_limit(limit)?;
                self.save_account(&account)?;
                Vec::new()
            }
        };
        for record in &records {
            self.record(record.clone());
        }
        Ok(records)
    }
}

impl AccountRepository for InMemoryBank {
    fn load_account(&self, account_id: AccountId) -> Result<Account, StoreError> {
        self.accounts
            .get(&account_id)
            .cloned()
            .ok_or(StoreError::AccountNotFound(account_id))
    }

    fn load_user(&self, user_id: UserId) -> Result<User, StoreError> {
        self.users
            .get(&user_id)
            .cloned()
            .ok_or(StoreError::UserNotFound(user_id))
    }

    fn save_account(&mut self, account: &Account) -> Result<(), StoreError> {
        match self.accounts.get_mut(&account.id()) {
            Some(stored) => {
                *stored = account.clone();
                Ok(())
            }
            None => self.open_account(account.clone()),
        }
    }
}

impl TransactionLog for InMemoryBank {
    fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    fn list_transactions(&self, account_id: AccountId) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|tx| tx.account_id() == account_id)
            .cloned()
            .collect()
    }
}

impl TransactionProcessor for InMemoryBank {
    fn process(
        &mut self,
        command: AccountCommand,
    ) -> Result<Vec<Transaction>, TransactionProcessError> {
        let account_id = command.account_id();
        match self.execute(command) {
            Ok(records) => {
                tracing::debug!(account_id, records = records.len(), "command applied");
                Ok(records)
            }
            Err(err) => {
                tracing::info!(account_id, error = %err, "command rejected");
                Err(err)
            }
        }
    }
}
