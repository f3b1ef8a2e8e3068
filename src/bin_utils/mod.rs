//! Drives the bank from a CSV list of operations and prints the resulting
//! accounts. Lives in the library so integration tests can run it.

use std::io::{Read, Write};

use crate::{
    command::AccountCommand,
    config::BankConfig,
    processor::{TransactionProcessError, TransactionProcessor, in_memory_processor::InMemoryBank},
};
use anyhow::Result;
use csv_parser::CsvOperationParser;
use csv_printer::print_accounts;
pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: BankConfig,
    pub error_printer: Box<dyn FnMut(u64, TransactionProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut bank = InMemoryBank::new(self.config);

        for (line, row) in parser {
            let row = row?;
            let result = AccountCommand::parse_command(row.kind, row.account, row.peer, row.amount)
                .map_err(TransactionProcessError::from)
                .and_then(|command| bank.process(command));
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        print_accounts(self.output, bank.accounts())
    }
}
