use std::io::Read;

use crate::{account::AccountId, command::OperationKind};
use anyhow::Context;
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OperationRow {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub account: AccountId,
    pub peer: Option<u32>,
    pub amount: Option<Decimal>,
}

/// Parses an operation list in CSV format. Each item carries the line it was
/// read from.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, OperationRow>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, anyhow::Result<OperationRow>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| {
            (
                curr_line,
                row.with_context(|| format!("Malformed row at line {curr_line}")),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_rows() {
        let input = "type,account,peer,amount\nopen_checking, 1, 7, 100\ndeposit,1,,2.5\ninterest,1,,\nbogus,1,,\n";
        let rows: Vec<(u64, anyhow::Result<OperationRow>)> =
            CsvOperationParser::new(input.as_bytes()).collect();
        assert_eq!(rows.len(), 4);

        let (_, first) = &rows[0];
        let first = first.as_ref().unwrap();
        assert_eq!(first.kind, OperationKind::OpenChecking);
        assert_eq!(first.peer, Some(7));
        assert_eq!(first.amount, Some(dec!(100)));

        let (_, second) = &rows[1];
        let second = second.as_ref().unwrap();
        assert_eq!(second.peer, None);
        assert_eq!(second.amount, Some(dec!(2.5)));

        let (_, third) = &rows[2];
        assert_eq!(third.as_ref().unwrap().amount, None);

        assert!(rows[3].1.is_err());
    }
}
