use std::ptr;

use parking_lot::{Mutex, MutexGuard};

use crate::{
    account::{Account, AccountError, AccountId},
    money::Money,
    transaction::{Transaction, TransactionKind},
};

/// Both records produced by a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub debit: Transaction,
    pub credit: Transaction,
}

/// Moves `amount` from `sender` to `recipient` as one unit.
///
/// The debit goes through the sender's withdrawal policy (a checking sender's
/// limit applies), the credit is a plain deposit. Both sides are validated
/// before either balance changes, so on error neither account is touched.
pub fn transfer(
    sender: &mut Account,
    recipient: &mut Account,
    amount: Money,
) -> Result<TransferReceipt, AccountError> {
    if sender.id() == recipient.id() {
        return Err(AccountError::InvalidRecipient);
    }
    let debit = sender.handle_debit(amount, TransactionKind::TransferOut)?;
    let credit = recipient.handle_credit(amount, TransactionKind::TransferIn)?;

    sender.apply(&debit)?;
    recipient.apply(&credit)?;
    Ok(TransferReceipt { debit, credit })
}

/// An account that may be reached from several threads at once.
///
/// Every operation holds the account's lock for its whole duration. Operations
/// spanning several accounts take the locks in ascending id order.
#[derive(Debug)]
pub struct SharedAccount {
    id: AccountId,
    inner: Mutex<Account>,
}

impl SharedAccount {
    pub fn new(account: Account) -> Self {
        Self {
            id: account.id(),
            inner: Mutex::new(account),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn snapshot(&self) -> Account {
        self.inner.lock().clone()
    }

    pub fn balance(&self) -> Money {
        self.inner.lock().balance()
    }

    pub fn deposit(&self, amount: Money) -> Result<Transaction, AccountError> {
        self.inner.lock().deposit(amount)
    }

    pub fn withdraw(&self, amount: Money) -> Result<Transaction, AccountError> {
        self.inner.lock().withdraw(amount)
    }

    pub fn apply_interest(&self) -> Result<Transaction, AccountError> {
        self.inner.lock().apply_interest()
    }

    pub fn into_inner(self) -> Account {
        self.inner.into_inner()
    }
}

/// [`transfer`] between two shared accounts. Both locks are held until both
/// records have been applied.
pub fn transfer_shared(
    sender: &SharedAccount,
    recipient: &SharedAccount,
    amount: Money,
) -> Result<TransferReceipt, AccountError> {
    // also keeps us from locking the same mutex twice
    if sender.id == recipient.id {
        return Err(AccountError::InvalidRecipient);
    }
    let (mut sender_guard, mut recipient_guard) = if sender.id < recipient.id {
        let s = sender.inner.lock();
        let r = recipient.inner.lock();
        (s, r)
    } else {
        let r = recipient.inner.lock();
        let s = sender.inner.lock();
        (s, r)
    };
    transfer(&mut sender_guard, &mut recipient_guard, amount)
}

/// Consistent copy of several accounts, taken while all of them are locked.
///
/// Locks are taken in ascending id order, ties broken by address. An account
/// passed more than once is locked once.
pub fn snapshot_all(accounts: &[&SharedAccount]) -> Vec<Account> {
    let mut order: Vec<&SharedAccount> = accounts.to_vec();
    order.sort_by_key(|shared| (shared.id, *shared as *const SharedAccount as usize));
    order.dedup_by(|a, b| ptr::eq(*a, *b));

    let guards: Vec<(&SharedAccount, MutexGuard<'_, Account>)> = order
        .iter()
        .map(|shared| (*shared, shared.inner.lock()))
        .collect();

    accounts
        .iter()
        .filter_map(|shared| {
            guards
                .iter()
                .find(|(locked, _)| ptr::eq(*locked, *shared))
                .map(|(_, guard)| Account::clone(guard))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::thread;

    use rust_decimal::Decimal;

    use super::*;

    fn money(value: u32) -> Money {
        Money::from(value)
    }

    #[test]
    fn transfer_then_rejected_transfer() {
        let mut a = Account::plain(1, 10, money(500));
        let mut b = Account::plain(2, 20, money(1500));

        let receipt = a.transfer(&mut b, money(50)).unwrap();
        assert_eq!(a.balance(), money(450));
        assert_eq!(b.balance(), money(1550));
        assert_eq!(receipt.debit.kind(), TransactionKind::TransferOut);
        assert_eq!(receipt.debit.account_id(), 1);
        assert_eq!(receipt.credit.kind(), TransactionKind::TransferIn);
        assert_eq!(receipt.credit.account_id(), 2);
        assert_eq!(receipt.credit.amount(), money(50));

        let err = a.transfer(&mut b, money(5000)).unwrap_err();
        assert!(matches!(err, AccountError::InsufficientFunds { .. }));
        assert_eq!(a.balance(), money(450));
        assert_eq!(b.balance(), money(1550));
    }

    #[test]
    fn self_transfer_rejected() {
        let mut a = Account::plain(1, 10, money(500));
        let mut same = a.clone();
        let err = a.transfer(&mut same, money(10)).unwrap_err();
        assert_eq!(err, AccountError::InvalidRecipient);
        // recipient is checked before the amount
        let err = a.transfer(&mut same, Money::ZERO).unwrap_err();
        assert_eq!(err, AccountError::InvalidRecipient);
        assert_eq!(a.balance(), money(500));
    }

    #[test]
    fn zero_transfer_rejected() {
        let mut a = Account::plain(1, 10, money(500));
        let mut b = Account::plain(2, 20, money(0));
        let err = a.transfer(&mut b, Money::ZERO).unwrap_err();
        assert_eq!(err, AccountError::InvalidAmount);
    }

    #[test]
    fn checking_limit_applies_to_sender_only() {
        let mut checking = Account::checking(1, 10, money(500), money(100));
        let mut plain = Account::plain(2, 20, money(500));

        let err = checking.transfer(&mut plain, money(200)).unwrap_err();
        assert!(matches!(err, AccountError::LimitExceeded { .. }));
        assert_eq!(checking.balance(), money(500));
        assert_eq!(plain.balance(), money(500));

        // incoming transfers ignore the recipient's limit
        plain.transfer(&mut checking, money(400)).unwrap();
        assert_eq!(checking.balance(), money(900));
        assert_eq!(plain.balance(), money(100));
    }

    #[test]
    fn failed_credit_leaves_sender_untouched() {
        let full = Money::new(Decimal::MAX).unwrap();
        let mut a = Account::plain(1, 10, money(500));
        let mut b = Account::plain(2, 20, full);
        let err = a.transfer(&mut b, money(1)).unwrap_err();
        assert_eq!(err, AccountError::BalanceOverflow);
        assert_eq!(a.balance(), money(500));
        assert_eq!(b.balance(), full);
    }

    #[test]
    fn shared_transfer_locks_both() {
        let a = SharedAccount::new(Account::plain(1, 10, money(500)));
        let b = SharedAccount::new(Account::plain(2, 20, money(1500)));

        transfer_shared(&a, &b, money(50)).unwrap();
        transfer_shared(&b, &a, money(25)).unwrap();
        assert_eq!(a.balance(), money(475));
        assert_eq!(b.balance(), money(1525));

        assert_eq!(
            transfer_shared(&a, &a, money(1)).unwrap_err(),
            AccountError::InvalidRecipient
        );
        assert_eq!(a.into_inner().balance(), money(475));
    }

    #[test]
    fn concurrent_transfers_conserve_money() {
        let accounts = [
            SharedAccount::new(Account::plain(1, 10, money(1000))),
            SharedAccount::new(Account::checking(2, 20, money(1000), money(7))),
            SharedAccount::new(Account::plain(3, 30, money(1000))),
        ];
        let total = money(3000);

        thread::scope(|scope| {
            for worker in 0..6usize {
                let accounts = &accounts;
                scope.spawn(move || {
                    for step in 0..500usize {
                        let from = &accounts[(worker + step) % 3];
                        let to = &accounts[(worker + step + 1 + worker % 2) % 3];
                        let amount = money((step % 11 + 1) as u32);
                        // rejections are expected, partial updates are not
                        let _ = transfer_shared(from, to, amount);
                    }
                });
            }
            let accounts = &accounts;
            scope.spawn(move || {
                for _ in 0..500 {
                    let refs: Vec<&SharedAccount> = accounts.iter().collect();
                    let sum = snapshot_all(&refs)
                        .iter()
                        .fold(Money::ZERO, |acc, account| {
                            acc.checked_add(account.balance()).unwrap()
                        });
                    assert_eq!(sum, total);
                }
            });
        });

        let refs: Vec<&SharedAccount> = accounts.iter().collect();
        let sum = snapshot_all(&refs)
            .iter()
            .fold(Money::ZERO, |acc, account| acc.checked_add(account.balance()).unwrap());
        assert_eq!(sum, total);
    }

    #[test]
    fn snapshot_all_keeps_caller_order() {
        let a = SharedAccount::new(Account::plain(5, 10, money(1)));
        let b = SharedAccount::new(Account::plain(3, 20, money(2)));
        let snapshot = snapshot_all(&[&a, &b, &a]);
        let ids: Vec<AccountId> = snapshot.iter().map(Account::id).collect();
        assert_eq!(ids, vec![5, 3, 5]);
    }

    #[test]
    fn snapshot_all_tells_instances_apart() {
        let a = SharedAccount::new(Account::plain(4, 10, money(1)));
        let twin = SharedAccount::new(Account::plain(4, 20, money(999)));
        let snapshot = snapshot_all(&[&a, &twin, &a]);
        let balances: Vec<Money> = snapshot.iter().map(Account::balance).collect();
        assert_eq!(balances, vec![money(1), money(999), money(1)]);
    }
}
