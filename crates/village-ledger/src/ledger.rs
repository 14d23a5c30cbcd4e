use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use village_chain::Chain;
use village_types::{Block, Payload, ShopEntry, ShopSide, Transaction};

use crate::account::{Shop, Villager};
use crate::error::LedgerError;
use crate::log::TransactionLog;

/// Village bookkeeping: villager wealth, shop totals, and the transaction
/// log, with every booking first appended to a hash-linked chain.
///
/// A booking that fails (unknown name, overflow, chain error) changes
/// nothing: balances, log and chain are all left as they were.
#[derive(Debug, Default)]
pub struct Ledger {
    villagers: BTreeMap<String, Villager>,
    shops: BTreeMap<String, Shop>,
    log: TransactionLog,
    chain: Chain<Payload>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a villager with zero wealth.
    pub fn add_villager(&mut self, name: &str) -> Result<(), LedgerError> {
        let name = validate_name(name)?;
        if self.villagers.contains_key(name) {
            return Err(LedgerError::DuplicateVillager(name.to_string()));
        }
        self.villagers.insert(name.to_string(), Villager::new());
        info!(villager = %name, "villager added");
        Ok(())
    }

    /// Record a wealth change for `name`, returning the block that holds it.
    pub fn record_transaction(
        &mut self,
        name: &str,
        amount: i64,
    ) -> Result<Block<Payload>, LedgerError> {
        let name = name.trim();
        let villager = self
            .villagers
            .get(name)
            .ok_or_else(|| LedgerError::UnknownVillager(name.to_string()))?;
        if villager.wealth_after(amount).is_none() {
            return Err(LedgerError::Overflow {
                name: name.to_string(),
                amount,
            });
        }

        let transaction = Transaction::new(name, amount);
        let block = self
            .chain
            .append(Payload::Transaction(transaction.clone()))?
            .clone();
        debug!(
            index = block.index,
            hash = %block.hash.short_hex(),
            villager = %name,
            amount,
            "transaction appended"
        );

        if let Some(villager) = self.villagers.get_mut(name) {
            villager.record_transaction(amount);
        }
        self.log.add(transaction);
        Ok(block)
    }

    pub fn wealth(&self, name: &str) -> Result<i64, LedgerError> {
        self.villager(name).map(|v| v.wealth)
    }

    pub fn villager(&self, name: &str) -> Result<&Villager, LedgerError> {
        let name = name.trim();
        self.villagers
            .get(name)
            .ok_or_else(|| LedgerError::UnknownVillager(name.to_string()))
    }

    /// Villagers in name order.
    pub fn villagers(&self) -> impl Iterator<Item = (&str, &Villager)> {
        self.villagers.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Register a shop with zero purchases and sales.
    pub fn add_shop(&mut self, name: &str) -> Result<(), LedgerError> {
        let name = validate_name(name)?;
        if self.shops.contains_key(name) {
            return Err(LedgerError::DuplicateShop(name.to_string()));
        }
        self.shops.insert(name.to_string(), Shop::new());
        info!(shop = %name, "shop added");
        Ok(())
    }

    pub fn record_purchase(
        &mut self,
        shop: &str,
        amount: i64,
    ) -> Result<Block<Payload>, LedgerError> {
        self.book_shop(shop, ShopSide::Purchase, amount)
    }

    pub fn record_sale(&mut self, shop: &str, amount: i64) -> Result<Block<Payload>, LedgerError> {
        self.book_shop(shop, ShopSide::Sale, amount)
    }

    pub fn profit(&self, shop: &str) -> Result<i128, LedgerError> {
        self.shop(shop).map(Shop::profit)
    }

    pub fn shop(&self, name: &str) -> Result<&Shop, LedgerError> {
        let name = name.trim();
        self.shops
            .get(name)
            .ok_or_else(|| LedgerError::UnknownShop(name.to_string()))
    }

    /// Shops in name order.
    pub fn shops(&self) -> impl Iterator<Item = (&str, &Shop)> {
        self.shops.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn transaction_log(&self) -> &TransactionLog {
        &self.log
    }

    pub fn chain(&self) -> &Chain<Payload> {
        &self.chain
    }

    /// Audit the backing chain. Logs the first violation, if any.
    pub fn verify(&self) -> bool {
        match self.chain.audit() {
            Ok(()) => true,
            Err(violation) => {
                warn!(index = violation.index, kind = %violation.kind, "chain integrity check failed");
                false
            }
        }
    }

    fn book_shop(
        &mut self,
        name: &str,
        side: ShopSide,
        amount: i64,
    ) -> Result<Block<Payload>, LedgerError> {
        let name = name.trim();
        let mut updated = *self.shop(name)?;
        let applied = match side {
            ShopSide::Purchase => updated.record_purchase(amount),
            ShopSide::Sale => updated.record_sale(amount),
        };
        if applied.is_none() {
            return Err(LedgerError::Overflow {
                name: name.to_string(),
                amount,
            });
        }

        let entry = ShopEntry {
            shop: name.to_string(),
            side,
            amount,
        };
        let block = self.chain.append(Payload::Shop(entry))?.clone();
        debug!(
            index = block.index,
            hash = %block.hash.short_hex(),
            shop = %name,
            %side,
            amount,
            "shop entry appended"
        );

        self.shops.insert(name.to_string(), updated);
        Ok(block)
    }
}

fn validate_name(name: &str) -> Result<&str, LedgerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    Ok(name)
}
