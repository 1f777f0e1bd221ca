use super::catalog::{PartName, CATALOG};
use super::part::Part;
use super::random::RandomSource;
use crate::error::{Result, ShopError};

/// What happened when a replacement part was offered to a car
#[derive(Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The car had a part with the same name; this is the part that came out
    Swapped(Part),
    /// Nothing matched, so the replacement is handed back untouched
    NoMatch(Part),
}

/// A customer car brought in by the tow truck.
///
/// A car always carries one part per catalog entry. When it arrives exactly
/// one of them is broken, picked uniformly at random.
#[derive(Debug, Clone)]
pub struct Car {
    parts: Vec<Part>,
}

impl Car {
    /// Build a car and break one random part
    pub fn new(random: &mut dyn RandomSource) -> Self {
        let mut car = Car::intact();
        let broken_index = random.next_index(car.len());
        car.parts[broken_index].break_down();
        car
    }

    /// A car with every part working, in catalog order
    fn intact() -> Self {
        Car {
            parts: CATALOG.iter().map(|&name| Part::new(name)).collect(),
        }
    }

    /// Number of installed parts
    pub(crate) fn len(&self) -> usize {
        self.parts.len()
    }

    /// Status of every installed part, in the order they sit in the car.
    /// Calling it again starts over from the first part.
    pub fn diagnostics(&self) -> impl Iterator<Item = (PartName, bool)> + '_ {
        self.parts.iter().map(|part| (part.name(), part.is_broken()))
    }

    /// Part at a given position
    pub fn part_at(&self, index: usize) -> Result<&Part> {
        self.parts.get(index).ok_or(ShopError::IndexOutOfRange {
            index,
            len: self.parts.len(),
        })
    }

    /// Name of the first broken part, if any
    pub fn broken_part(&self) -> Option<PartName> {
        self.diagnostics()
            .find(|(_, is_broken)| *is_broken)
            .map(|(name, _)| name)
    }

    /// Take out the installed part with the replacement's name and put the
    /// replacement in. The new part goes to the end of the list.
    pub fn swap(&mut self, replacement: Part) -> SwapOutcome {
        match self
            .parts
            .iter()
            .position(|part| part.name() == replacement.name())
        {
            Some(index) => {
                let removed = self.parts.remove(index);
                self.parts.push(replacement);
                SwapOutcome::Swapped(removed)
            }
            None => SwapOutcome::NoMatch(replacement),
        }
    }

    /// Car with a chosen part broken
    #[cfg(test)]
    pub fn with_broken(name: PartName) -> Self {
        let mut car = Car::intact();
        if let Some(part) = car.parts.iter_mut().find(|part| part.name() == name) {
            part.break_down();
        }
        car
    }

    /// Car missing some catalog parts, for exercising the no-match path
    #[cfg(test)]
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Car { parts }
    }
}
