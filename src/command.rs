use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::{AccountId, UserId},
    money::Money,
    policy::AccountKind,
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    OpenPlain,
    OpenChecking,
    OpenSavings,
    Deposit,
    Withdrawal,
    Transfer,
    Interest,
    Limit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCommand {
    Open {
        account_id: AccountId,
        owner_id: UserId,
        kind: AccountKind,
        withdrawal_limit: Option<Money>,
    },
    Deposit {
        account_id: AccountId,
        amount: Money,
    },
    Withdraw {
        account_id: AccountId,
        amount: Money,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Money,
    },
    ApplyInterest {
        account_id: AccountId,
    },
    SetWithdrawalLimit {
        account_id: AccountId,
        limit: Money,
    },
}

#[derive(Debug, Error)]
pub enum AccountCommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Amount must not be negative for {kind:?}")]
    NegativeAmount { kind: OperationKind },
    #[error("Owner is required for {kind:?}")]
    OwnerRequired { kind: OperationKind },
    #[error("Recipient is required for {kind:?}")]
    RecipientRequired { kind: OperationKind },
}

impl AccountCommand {
    /// Builds a command from the loose fields of an input row. `peer` is the
    /// owner when opening an account and the recipient of a transfer.
    pub fn parse_command(
        kind: OperationKind,
        account_id: AccountId,
        peer: Option<u32>,
        amount: Option<Decimal>,
    ) -> Result<Self, AccountCommandError> {
        match kind {
            OperationKind::OpenPlain | OperationKind::OpenChecking | OperationKind::OpenSavings => {
                let owner_id = peer.ok_or(AccountCommandError::OwnerRequired { kind })?;
                let (kind, withdrawal_limit) = match kind {
                    OperationKind::OpenChecking => (
                        AccountKind::Checking,
                        amount
                            .map(|amount| Self::parse_amount(kind, amount))
                            .transpose()?,
                    ),
                    OperationKind::OpenSavings => (AccountKind::Savings, None),
                    _ => (AccountKind::Plain, None),
                };
                Ok(Self::Open {
                    account_id,
                    owner_id,
                    kind,
                    withdrawal_limit,
                })
            }
            OperationKind::Deposit => Ok(Self::Deposit {
                account_id,
                amount: Self::parse_required_amount(kind, amount)?,
            }),
            OperationKind::Withdrawal => Ok(Self::Withdraw {
                account_id,
                amount: Self::parse_required_amount(kind, amount)?,
            }),
            OperationKind::Transfer => Ok(Self::Transfer {
                from: account_id,
                to: peer.ok_or(AccountCommandError::RecipientRequired { kind })?,
                amount: Self::parse_required_amount(kind, amount)?,
            }),
            OperationKind::Interest => Ok(Self::ApplyInterest { account_id }),
            OperationKind::Limit => Ok(Self::SetWithdrawalLimit {
                account_id,
                limit: Self::parse_required_amount(kind, amount)?,
            }),
        }
    }

    /// The account the command is addressed to.
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::Open { account_id, .. }
            | Self::Deposit { account_id, .. }
            | Self::Withdraw { account_id, .. }
            | Self::ApplyInterest { account_id }
            | Self::SetWithdrawalLimit { account_id, .. } => *account_id,
            Self::Transfer { from, .. } => *from,
        }
    }

    fn parse_required_amount(
        kind: OperationKind,
        amount: Option<Decimal>,
    ) -> Result<Money, AccountCommandError> {
        let amount = amount.ok_or(AccountCommandError::AmountRequired { kind })?;
        Self::parse_amount(kind, amount)
    }

    fn parse_amount(kind: OperationKind, amount: Decimal) -> Result<Money, AccountCommandError> {
        // zero passes here; the account itself rejects it
        Money::new(amount).map_err(|_| AccountCommandError::NegativeAmount { kind })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_money_movements() {
        let cmd =
            AccountCommand::parse_command(OperationKind::Deposit, 1, None, Some(dec!(1.5)))
                .unwrap();
        assert_eq!(
            cmd,
            AccountCommand::Deposit {
                account_id: 1,
                amount: Money::new(dec!(1.5)).unwrap()
            }
        );

        let cmd =
            AccountCommand::parse_command(OperationKind::Transfer, 1, Some(2), Some(dec!(3)))
                .unwrap();
        assert_eq!(
            cmd,
            AccountCommand::Transfer {
                from: 1,
                to: 2,
                amount: Money::from(3)
            }
        );
        assert_eq!(cmd.account_id(), 1);

        // zero is left for the account to reject
        assert!(
            AccountCommand::parse_command(OperationKind::Withdrawal, 1, None, Some(dec!(0)))
                .is_ok()
        );
    }

    #[test]
    fn parse_open() {
        let cmd =
            AccountCommand::parse_command(OperationKind::OpenChecking, 4, Some(9), Some(dec!(100)))
                .unwrap();
        assert_eq!(
            cmd,
            AccountCommand::Open {
                account_id: 4,
                owner_id: 9,
                kind: AccountKind::Checking,
                withdrawal_limit: Some(Money::from(100)),
            }
        );

        let cmd = AccountCommand::parse_command(OperationKind::OpenSavings, 5, Some(9), None)
            .unwrap();
        assert!(matches!(
            cmd,
            AccountCommand::Open {
                kind: AccountKind::Savings,
                withdrawal_limit: None,
                ..
            }
        ));
    }

    #[test]
    fn parse_errors() {
        let err = AccountCommand::parse_command(OperationKind::Deposit, 1, None, None).unwrap_err();
        assert!(matches!(
            err,
            AccountCommandError::AmountRequired {
                kind: OperationKind::Deposit
            }
        ));
        assert_eq!(err.to_string(), "Amount is required for Deposit");

        let err =
            AccountCommand::parse_command(OperationKind::Withdrawal, 1, None, Some(dec!(-1)))
                .unwrap_err();
        assert!(matches!(err, AccountCommandError::NegativeAmount { .. }));

        let err = AccountCommand::parse_command(OperationKind::Transfer, 1, None, Some(dec!(1)))
            .unwrap_err();
        assert!(matches!(err, AccountCommandError::RecipientRequired { .. }));

        let err =
            AccountCommand::parse_command(OperationKind::OpenPlain, 1, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Owner is required for OpenPlain");
    }
}
