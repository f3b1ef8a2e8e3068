use std::io::Write;

use crate::{
    account::{Account, AccountId, UserId},
    money::Money,
    policy::AccountKind,
};
use csv::Writer;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AccountRow {
    pub account: AccountId,
    pub owner: UserId,
    pub kind: AccountKind,
    pub balance: Money,
}

impl From<&Account> for AccountRow {
    fn from(acc: &Account) -> Self {
        Self {
            account: acc.id(),
            owner: acc.owner_id(),
            kind: acc.kind(),
            balance: acc.balance(),
        }
    }
}

/// Writes one row per account, ordered by account id.
pub fn print_accounts<'a, W>(
    output: &mut W,
    accounts: impl Iterator<Item = &'a Account>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut rows: Vec<AccountRow> = accounts.map(AccountRow::from).collect();
    rows.sort_by_key(|row| row.account);

    let mut writer = Writer::from_writer(output);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
