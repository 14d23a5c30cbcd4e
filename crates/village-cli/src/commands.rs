use std::io::{self, Write};

use tracing::info;
use village_ledger::Ledger;

use crate::cli::{Cli, Command};
use crate::config::CliConfig;
use crate::menu::Menu;
use crate::report;

pub fn run_command(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Command::Run) {
        Command::Run => cmd_run(config),
        Command::Demo => cmd_demo(&mut io::stdout().lock()),
    }
}

fn cmd_run(config: &CliConfig) -> anyhow::Result<()> {
    info!("starting interactive session");
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut menu = Menu::new(stdin, stdout, Ledger::new(), config.prompt.clone());
    menu.run()?;
    info!(
        blocks = menu.ledger().chain().len(),
        "interactive session ended"
    );
    Ok(())
}

/// Scripted session: two villagers, three transactions, one shop.
fn cmd_demo(out: &mut impl Write) -> anyhow::Result<()> {
    let mut ledger = Ledger::new();

    for name in ["alice", "bob"] {
        ledger.add_villager(name)?;
        writeln!(out, "{name} has been added to the system")?;
    }
    for (name, amount) in [("alice", 50), ("bob", 20), ("alice", -15)] {
        ledger.record_transaction(name, amount)?;
    }

    ledger.add_shop("bakery")?;
    ledger.record_purchase("bakery", 40)?;
    ledger.record_sale("bakery", 65)?;

    for (name, villager) in ledger.villagers() {
        report::write_wealth(out, name, villager.wealth)?;
    }
    for (name, shop) in ledger.shops() {
        report::write_profit(out, name, shop.profit())?;
    }
    report::write_log(out, ledger.transaction_log())?;
    report::write_chain(out, ledger.chain())?;
    report::write_verification(out, &ledger)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_reports_balances_and_integrity() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        cmd_demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("alice has a wealth of 35\n"));
        assert!(text.contains("bob has a wealth of 20\n"));
        assert!(text.contains("bakery has a profit of 25\n"));
        assert!(text.contains(
            "Transaction log:\nalice made a transaction of 50\nbob made a transaction of 20\nalice made a transaction of -15\n"
        ));
        assert!(text.contains("Chain (6 blocks):\n"));
        assert!(text.ends_with("✓ Chain integrity verified (6 blocks)\n"));
    }
}
