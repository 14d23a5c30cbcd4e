/// A villager's running wealth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Villager {
    pub wealth: i64,
}

impl Villager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wealth after applying `amount`, or `None` on overflow.
    pub fn wealth_after(&self, amount: i64) -> Option<i64> {
        self.wealth.checked_add(amount)
    }

    /// Apply a transaction. Returns the new wealth, or `None` (leaving the
    /// balance untouched) on overflow.
    pub fn record_transaction(&mut self, amount: i64) -> Option<i64> {
        let wealth = self.wealth_after(amount)?;
        self.wealth = wealth;
        Some(wealth)
    }
}

/// Running purchase and sale totals of a shop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Shop {
    pub purchases: i64,
    pub sales: i64,
}

impl Shop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the purchase total. `None` on overflow, totals unchanged.
    pub fn record_purchase(&mut self, amount: i64) -> Option<i64> {
        self.purchases = self.purchases.checked_add(amount)?;
        Some(self.purchases)
    }

    /// Add to the sales total. `None` on overflow, totals unchanged.
    pub fn record_sale(&mut self, amount: i64) -> Option<i64> {
        self.sales = self.sales.checked_add(amount)?;
        Some(self.sales)
    }

    /// Sales minus purchases. Widened so it cannot overflow.
    pub fn profit(&self) -> i128 {
        i128::from(self.sales) - i128::from(self.purchases)
    }
}
