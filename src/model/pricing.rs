use std::collections::BTreeMap;

use super::catalog::{PartName, CATALOG};
use super::random::RandomSource;
use crate::error::{Result, ShopError};

/// What the shop charges for replacing each kind of part.
/// Generated once when the shop opens; it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    prices: BTreeMap<PartName, u32>,
}

impl PriceTable {
    /// Random price in `[min_price, max_price)` for every catalog name,
    /// unless `fixed` already names a price for it.
    pub fn generate(
        random: &mut dyn RandomSource,
        min_price: u32,
        max_price: u32,
        fixed: &BTreeMap<PartName, u32>,
    ) -> Self {
        let prices = CATALOG
            .iter()
            .map(|&name| {
                let rolled = random.next_in_range(min_price, max_price);
                (name, fixed.get(&name).copied().unwrap_or(rolled))
            })
            .collect();
        PriceTable { prices }
    }

    #[cfg(test)]
    pub fn from_prices(prices: BTreeMap<PartName, u32>) -> Self {
        PriceTable { prices }
    }

    pub fn price_of(&self, name: PartName) -> Result<u32> {
        self.prices
            .get(&name)
            .copied()
            .ok_or_else(|| ShopError::UnknownPart {
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartName, u32)> + '_ {
        self.prices.iter().map(|(&name, &price)| (name, price))
    }
}
