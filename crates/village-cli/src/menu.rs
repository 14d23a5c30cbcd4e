use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use colored::Colorize;
use tracing::debug;
use village_ledger::Ledger;

use crate::report;

/// A command typed at the menu prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    AddVillager,
    AddShop,
    Record,
    Purchase,
    Sale,
    PrintWealth,
    PrintProfit,
    PrintLog,
    PrintChain,
    Verify,
    Exit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for MenuCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.join(" ").as_str() {
            "add" => Ok(Self::AddVillager),
            "add shop" => Ok(Self::AddShop),
            "record" => Ok(Self::Record),
            "purchase" => Ok(Self::Purchase),
            "sale" => Ok(Self::Sale),
            "print wealth" => Ok(Self::PrintWealth),
            "print profit" => Ok(Self::PrintProfit),
            "print log" => Ok(Self::PrintLog),
            "print chain" => Ok(Self::PrintChain),
            "verify" => Ok(Self::Verify),
            "exit" => Ok(Self::Exit),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Line-oriented conversation with the operator.
///
/// Reads one command per line, asks follow-up questions, and writes status
/// lines. Stops on `exit` or at end of input.
pub struct Menu<R, W> {
    input: R,
    output: W,
    ledger: Ledger,
    prompt: String,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, ledger: Ledger, prompt: impl Into<String>) -> Self {
        Self {
            input,
            output,
            ledger,
            prompt: prompt.into(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let prompt = self.prompt.clone();
            let Some(line) = self.ask(&prompt)? else {
                debug!("end of input; leaving menu");
                return Ok(());
            };
            if line.is_empty() {
                continue;
            }

            let command = match line.parse::<MenuCommand>() {
                Ok(command) => command,
                Err(err) => {
                    self.error(err)?;
                    continue;
                }
            };
            debug!(?command, "menu command");

            if let Flow::Exit = self.dispatch(command)? {
                return Ok(());
            }
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn dispatch(&mut self, command: MenuCommand) -> io::Result<Flow> {
        match command {
            MenuCommand::AddVillager => {
                let Some(name) = self.ask("Enter the name of the villager to add: ")? else {
                    return Ok(Flow::Exit);
                };
                match self.ledger.add_villager(&name) {
                    Ok(()) => writeln!(self.output, "{name} has been added to the system")?,
                    Err(err) => self.error(err)?,
                }
            }
            MenuCommand::AddShop => {
                let Some(name) = self.ask("Enter the name of the shop to add: ")? else {
                    return Ok(Flow::Exit);
                };
                match self.ledger.add_shop(&name) {
                    Ok(()) => writeln!(self.output, "Shop {name} has been added to the system")?,
                    Err(err) => self.error(err)?,
                }
            }
            MenuCommand::Record => {
                let Some((name, amount)) = self.ask_booking(
                    "Enter the name of the villager making the transaction: ",
                    "Enter the amount of the transaction: ",
                )?
                else {
                    return Ok(Flow::Exit);
                };
                if let Some(amount) = amount {
                    match self.ledger.record_transaction(&name, amount) {
                        Ok(_) => writeln!(self.output, "Transaction recorded")?,
                        Err(err) => self.error(err)?,
                    }
                }
            }
            MenuCommand::Purchase => {
                let Some((name, amount)) = self.ask_booking(
                    "Enter the name of the shop making the purchase: ",
                    "Enter the amount of the purchase: ",
                )?
                else {
                    return Ok(Flow::Exit);
                };
                if let Some(amount) = amount {
                    match self.ledger.record_purchase(&name, amount) {
                        Ok(_) => writeln!(self.output, "Purchase recorded")?,
                        Err(err) => self.error(err)?,
                    }
                }
            }
            MenuCommand::Sale => {
                let Some((name, amount)) = self.ask_booking(
                    "Enter the name of the shop making the sale: ",
                    "Enter the amount of the sale: ",
                )?
                else {
                    return Ok(Flow::Exit);
                };
                if let Some(amount) = amount {
                    match self.ledger.record_sale(&name, amount) {
                        Ok(_) => writeln!(self.output, "Sale recorded")?,
                        Err(err) => self.error(err)?,
                    }
                }
            }
            MenuCommand::PrintWealth => {
                let Some(name) =
                    self.ask("Enter the name of the villager to print the wealth for: ")?
                else {
                    return Ok(Flow::Exit);
                };
                match self.ledger.wealth(&name) {
                    Ok(wealth) => report::write_wealth(&mut self.output, &name, wealth)?,
                    Err(err) => self.error(err)?,
                }
            }
            MenuCommand::PrintProfit => {
                let Some(name) = self.ask("Enter the name of the shop to print the profit for: ")?
                else {
                    return Ok(Flow::Exit);
                };
                match self.ledger.profit(&name) {
                    Ok(profit) => report::write_profit(&mut self.output, &name, profit)?,
                    Err(err) => self.error(err)?,
                }
            }
            MenuCommand::PrintLog => {
                report::write_log(&mut self.output, self.ledger.transaction_log())?
            }
            MenuCommand::PrintChain => report::write_chain(&mut self.output, self.ledger.chain())?,
            MenuCommand::Verify => report::write_verification(&mut self.output, &self.ledger)?,
            MenuCommand::Exit => {
                writeln!(self.output, "Exiting the system...")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Show `prompt` and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for a name and an amount. The amount is `None` if it did not
    /// parse; the error has already been reported.
    fn ask_booking(
        &mut self,
        name_prompt: &str,
        amount_prompt: &str,
    ) -> io::Result<Option<(String, Option<i64>)>> {
        let Some(name) = self.ask(name_prompt)? else {
            return Ok(None);
        };
        let Some(raw) = self.ask(amount_prompt)? else {
            return Ok(None);
        };
        match raw.parse::<i64>() {
            Ok(amount) => Ok(Some((name, Some(amount)))),
            Err(_) => {
                self.error(format!("invalid amount: {raw:?}"))?;
                Ok(Some((name, None)))
            }
        }
    }

    fn error(&mut self, err: impl Display) -> io::Result<()> {
        writeln!(self.output, "{} {err}", "error:".red().bold())
    }
}
