use std::io::{self, Write};

use colored::Colorize;
use village_chain::Chain;
use village_ledger::{Ledger, TransactionLog};
use village_types::Payload;

pub fn write_wealth(out: &mut impl Write, name: &str, wealth: i64) -> io::Result<()> {
    writeln!(out, "{name} has a wealth of {wealth}")
}

pub fn write_profit(out: &mut impl Write, name: &str, profit: i128) -> io::Result<()> {
    writeln!(out, "{name} has a profit of {profit}")
}

pub fn write_log(out: &mut impl Write, log: &TransactionLog) -> io::Result<()> {
    writeln!(out, "Transaction log:")?;
    for transaction in log {
        writeln!(out, "{transaction}")?;
    }
    Ok(())
}

pub fn write_chain(out: &mut impl Write, chain: &Chain<Payload>) -> io::Result<()> {
    writeln!(out, "Chain ({} blocks):", chain.len())?;
    for block in chain {
        writeln!(
            out,
            "  {} {} <- {} @{} {}",
            format!("#{}", block.index).yellow(),
            block.hash.short_hex().dimmed(),
            block.previous_hash.short_hex().dimmed(),
            block.timestamp,
            block.payload
        )?;
    }
    Ok(())
}

pub fn write_verification(out: &mut impl Write, ledger: &Ledger) -> io::Result<()> {
    let blocks = ledger.chain().len();
    if ledger.verify() {
        return writeln!(
            out,
            "{} Chain integrity verified ({blocks} blocks)",
            "✓".green().bold()
        );
    }
    match ledger.chain().audit() {
        Err(violation) => writeln!(out, "{} {violation}", "✗".red().bold()),
        Ok(()) => Ok(()),
    }
}
