//! Spare parts storage
//!
//! Each catalog name owns a FIFO queue of working parts. Storage is stocked
//! once when the shop opens and never restocked, so every withdrawal is final.

use std::collections::{BTreeMap, VecDeque};

use super::catalog::{PartName, CATALOG};
use super::part::Part;
use super::random::RandomSource;
use crate::error::{Result, ShopError};

#[derive(Debug, Clone)]
pub struct Storage {
    shelves: BTreeMap<PartName, VecDeque<Part>>,
}

impl Storage {
    /// Stock every catalog name with a random amount in `[0, max_amount)`.
    /// Names listed in `fixed` get that exact amount instead; the dice are
    /// still rolled for them so a seed gives the same remaining sequence.
    pub fn stocked(
        random: &mut dyn RandomSource,
        max_amount: u32,
        fixed: &BTreeMap<PartName, u32>,
    ) -> Self {
        let mut amounts = BTreeMap::new();
        for &name in CATALOG.iter() {
            let rolled = random.next_in_range(0, max_amount);
            amounts.insert(name, fixed.get(&name).copied().unwrap_or(rolled));
        }
        Storage::with_amounts(&amounts)
    }

    /// Stock with exact amounts; names missing from `amounts` get an empty shelf
    pub fn with_amounts(amounts: &BTreeMap<PartName, u32>) -> Self {
        let shelves = CATALOG
            .iter()
            .map(|&name| {
                let amount = amounts.get(&name).copied().unwrap_or(0);
                let queue = (0..amount).map(|_| Part::new(name)).collect();
                (name, queue)
            })
            .collect();
        Storage { shelves }
    }

    /// How many parts of this kind are left
    pub fn quantity_of(&self, name: PartName) -> usize {
        self.shelves.get(&name).map(VecDeque::len).unwrap_or(0)
    }

    /// Every stocked name, in catalog order
    pub fn list_names(&self) -> Vec<PartName> {
        self.shelves.keys().copied().collect()
    }

    /// Total parts left across all shelves
    pub fn total_quantity(&self) -> usize {
        self.shelves.values().map(VecDeque::len).sum()
    }

    /// Take the oldest part of this kind off the shelf.
    /// An empty shelf gives `OutOfStock`; that is a normal outcome, not a crash.
    pub fn withdraw(&mut self, name: PartName) -> Result<Part> {
        let shelf = self
            .shelves
            .get_mut(&name)
            .ok_or_else(|| ShopError::UnknownPart {
                name: name.to_string(),
            })?;
        shelf
            .pop_front()
            .ok_or(ShopError::OutOfStock { part: name })
    }
}
