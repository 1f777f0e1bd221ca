//! Car Service - the repair loop that ties the shop together
//!
//! One round of the loop:
//! 1. A tow truck brings a car with one broken part
//! 2. The operator reads the diagnostics
//! 3. The operator picks a spare part from storage, or refuses the customer
//! 4. The swap (or the refusal) is billed
//! 5. The operator decides whether to take the next car
//!
//! Money rules:
//! - fixed part swapped out:  +price of that part
//! - working part swapped out: -price of that part
//! - refusal or missing stock: -forfeit

use std::collections::BTreeMap;
use std::fmt;

use super::car::{Car, SwapOutcome};
use super::catalog::PartName;
use super::decision::{CommandKeys, Decision};
use super::ledger::{Ledger, TransactionKind};
use super::part::Part;
use super::pricing::PriceTable;
use super::random::RandomSource;
use super::storage::Storage;
use crate::console::ShopConsole;
use crate::error::{Result, ShopError};

/// Numbers the shop opens with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopSettings {
    pub forfeit: u32,
    pub min_price: u32,
    pub max_price: u32,
    pub max_stock: u32,
    pub keys: CommandKeys,
    /// Exact starting amounts for some parts instead of random ones
    pub fixed_stock: BTreeMap<PartName, u32>,
    /// Exact prices for some parts instead of random ones
    pub fixed_prices: BTreeMap<PartName, u32>,
}

impl Default for ShopSettings {
    fn default() -> Self {
        ShopSettings {
            forfeit: 100,
            min_price: 200,
            max_price: 1000,
            max_stock: 10,
            keys: CommandKeys::default(),
            fixed_stock: BTreeMap::new(),
            fixed_prices: BTreeMap::new(),
        }
    }
}

/// Where the repair loop currently is
///
/// ```text
/// AwaitingCar -> Diagnosing -> AwaitingDecision -+-> Swapping -> Settling -+
///      ^                                         +-> Refusing -------------+-> AwaitingContinue
///      |                                         +-> OutOfStock -----------+        |
///      +----------------------------------------------------------------------------+-> Terminated
/// ```
#[derive(Debug)]
pub enum ShopState {
    AwaitingCar,
    Diagnosing(Car),
    AwaitingDecision(Car),
    Swapping { car: Car, replacement: Part },
    Refusing,
    OutOfStock(PartName),
    /// Holds the part that just came out of the car
    Settling(Part),
    AwaitingContinue,
    Terminated,
}

impl ShopState {
    pub fn name(&self) -> &'static str {
        match self {
            ShopState::AwaitingCar => "AwaitingCar",
            ShopState::Diagnosing(_) => "Diagnosing",
            ShopState::AwaitingDecision(_) => "AwaitingDecision",
            ShopState::Swapping { .. } => "Swapping",
            ShopState::Refusing => "Refusing",
            ShopState::OutOfStock(_) => "OutOfStock",
            ShopState::Settling(_) => "Settling",
            ShopState::AwaitingContinue => "AwaitingContinue",
            ShopState::Terminated => "Terminated",
        }
    }
}

/// Counters for the end-of-session report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub cars_served: u32,
    pub repairs: u32,
    pub wrong_swaps: u32,
    pub refusals: u32,
    pub out_of_stock: u32,
    pub income: i64,
    pub expenses: i64,
    pub balance: i64,
    pub parts_left: usize,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cars served:      {}", self.cars_served)?;
        writeln!(f, "Repairs:          {}", self.repairs)?;
        writeln!(f, "Wrong swaps:      {}", self.wrong_swaps)?;
        writeln!(f, "Refusals:         {}", self.refusals)?;
        writeln!(f, "Missing stock:    {}", self.out_of_stock)?;
        writeln!(f, "Parts in storage: {}", self.parts_left)?;
        writeln!(f, "Income:           {}", self.income)?;
        writeln!(f, "Expenses:         {}", self.expenses)?;
        write!(f, "Final cash:       {}", self.balance)
    }
}

/// The shop itself. Owns storage, prices and the cash register for the
/// whole session; nothing else mutates them.
pub struct CarService<C: ShopConsole> {
    console: C,
    random: Box<dyn RandomSource>,
    storage: Storage,
    prices: PriceTable,
    ledger: Ledger,
    keys: CommandKeys,
    forfeit: u32,
    summary: SessionSummary,
}

impl<C: ShopConsole> CarService<C> {
    /// Open the shop: stock storage, then price every part
    pub fn new(console: C, mut random: Box<dyn RandomSource>, settings: ShopSettings) -> Self {
        let storage = Storage::stocked(random.as_mut(), settings.max_stock, &settings.fixed_stock);
        let prices = PriceTable::generate(
            random.as_mut(),
            settings.min_price,
            settings.max_price,
            &settings.fixed_prices,
        );

        for (name, price) in prices.iter() {
            tracing::debug!(
                part = %name,
                price,
                stock = storage.quantity_of(name),
                "shop opened with part"
            );
        }

        CarService::with_inventory(console, random, storage, prices, settings.keys, settings.forfeit)
    }

    /// Open the shop with storage and prices prepared by the caller
    pub fn with_inventory(
        console: C,
        random: Box<dyn RandomSource>,
        storage: Storage,
        prices: PriceTable,
        keys: CommandKeys,
        forfeit: u32,
    ) -> Self {
        CarService {
            console,
            random,
            storage,
            prices,
            ledger: Ledger::new(),
            keys,
            forfeit,
            summary: SessionSummary::default(),
        }
    }

    #[cfg(test)]
    pub fn balance(&self) -> i64 {
        self.ledger.balance()
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[cfg(test)]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[cfg(test)]
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Snapshot of the session counters
    pub fn summary(&self) -> SessionSummary {
        let (income, expenses) = self.ledger.history().iter().fold(
            (0, 0),
            |(income, expenses), transaction| match transaction.amount {
                amount if amount >= 0 => (income + amount, expenses),
                amount => (income, expenses - amount),
            },
        );
        SessionSummary {
            income,
            expenses,
            balance: self.ledger.balance(),
            parts_left: self.storage.total_quantity(),
            ..self.summary.clone()
        }
    }

    /// Serve cars until the operator quits or input runs out
    pub fn run(&mut self) -> Result<SessionSummary> {
        tracing::info!(forfeit = self.forfeit, "shop open");

        let mut state = ShopState::AwaitingCar;
        while !matches!(state, ShopState::Terminated) {
            let from = state.name();
            state = self.advance(state)?;
            tracing::trace!(from, to = state.name(), "state transition");
        }

        let summary = self.summary();
        tracing::info!(
            cars = summary.cars_served,
            repairs = summary.repairs,
            wrong_swaps = summary.wrong_swaps,
            refusals = summary.refusals,
            out_of_stock = summary.out_of_stock,
            balance = summary.balance,
            "shop closed"
        );
        Ok(summary)
    }

    /// Perform one state's work and return the next state
    pub fn advance(&mut self, state: ShopState) -> Result<ShopState> {
        match state {
            ShopState::AwaitingCar => {
                self.console.clear()?;
                self.show_balance()?;
                let car = Car::new(self.random.as_mut());
                self.summary.cars_served += 1;
                tracing::info!(
                    car = self.summary.cars_served,
                    broken = ?car.broken_part(),
                    "car arrived"
                );
                self.console
                    .print_line("The tow truck brought in a car with a breakdown.")?;
                Ok(ShopState::Diagnosing(car))
            }
            ShopState::Diagnosing(car) => {
                self.show_diagnostics(&car)?;
                Ok(ShopState::AwaitingDecision(car))
            }
            ShopState::AwaitingDecision(car) => match self.read_decision()? {
                None => {
                    tracing::info!("input closed while waiting for a decision");
                    Ok(ShopState::Terminated)
                }
                Some(Decision::Refuse) => Ok(ShopState::Refusing),
                Some(Decision::Replace(name)) => match self.storage.withdraw(name) {
                    Ok(replacement) => {
                        tracing::info!(
                            part = %name,
                            left = self.storage.quantity_of(name),
                            "part withdrawn from storage"
                        );
                        Ok(ShopState::Swapping { car, replacement })
                    }
                    Err(ShopError::OutOfStock { part }) => Ok(ShopState::OutOfStock(part)),
                    Err(err) => Err(err),
                },
            },
            ShopState::Swapping {
                mut car,
                replacement,
            } => match car.swap(replacement) {
                SwapOutcome::Swapped(removed) => Ok(ShopState::Settling(removed)),
                SwapOutcome::NoMatch(part) => {
                    tracing::error!(part = %part.name(), "car has no matching part");
                    Err(ShopError::NoMatchOnSwap { part: part.name() })
                }
            },
            ShopState::Refusing => {
                self.summary.refusals += 1;
                self.console.print_line("")?;
                self.console.print_line(&format!(
                    "You turned the customer away and paid a forfeit of {}.",
                    self.forfeit
                ))?;
                self.pay_forfeit(TransactionKind::RefusalForfeit);
                Ok(ShopState::AwaitingContinue)
            }
            ShopState::OutOfStock(name) => {
                self.summary.out_of_stock += 1;
                self.console.print_line("")?;
                self.console
                    .print_line(&format!("There is no {} left in storage.", name))?;
                self.console.print_line(&format!(
                    "The customer leaves and you pay a forfeit of {}.",
                    self.forfeit
                ))?;
                self.pay_forfeit(TransactionKind::OutOfStockForfeit(name));
                Ok(ShopState::AwaitingContinue)
            }
            ShopState::Settling(removed) => {
                self.settle(&removed)?;
                Ok(ShopState::AwaitingContinue)
            }
            ShopState::AwaitingContinue => {
                self.console.print_line("")?;
                self.show_balance()?;
                let prompt = format!(
                    "Press any key to take the next car or '{}' to close the shop...",
                    self.keys.exit
                );
                match self.console.read_key(&prompt)? {
                    Some(key) if !self.keys.is_exit(key) => Ok(ShopState::AwaitingCar),
                    _ => Ok(ShopState::Terminated),
                }
            }
            ShopState::Terminated => Ok(ShopState::Terminated),
        }
    }

    /// Ask until the operator types something usable.
    /// Bad input is reported and asked again; nothing else changes.
    fn read_decision(&mut self) -> Result<Option<Decision>> {
        let names = self.storage.list_names();
        self.show_repair_options(&names)?;

        let prompt = format!(
            "\nType '{}' to turn the customer away\nPart number to replace: ",
            self.keys.refuse
        );
        loop {
            let Some(input) = self.console.read_line(&prompt)? else {
                return Ok(None);
            };
            match self.keys.resolve_decision(&input, &names) {
                Ok(decision) => return Ok(Some(decision)),
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(error = %err, "rejected operator input");
                    self.console.print_line("Invalid input!")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Bill the swap based on the state of the part that came out
    fn settle(&mut self, removed: &Part) -> Result<()> {
        let name = removed.name();
        let price = self.prices.price_of(name)?;

        self.console.print_line("")?;
        if removed.is_broken() {
            self.summary.repairs += 1;
            self.ledger.credit(TransactionKind::RepairPayment(name), price);
            tracing::info!(part = %name, price, balance = self.ledger.balance(), "repair paid");
            self.console
                .print_line(&format!("You fixed the breakdown: {}.", name))?;
            self.console
                .print_line(&format!("Cash went up by {} for the work.", price))?;
        } else {
            self.summary.wrong_swaps += 1;
            self.ledger.debit(TransactionKind::DamageRefund(name), price);
            tracing::info!(part = %name, price, balance = self.ledger.balance(), "working part swapped");
            self.console.print_line(&format!(
                "The breakdown is still there; you replaced a working part: {}.",
                name
            ))?;
            self.console
                .print_line(&format!("Cash went down by {} in damages.", price))?;
        }
        Ok(())
    }

    fn pay_forfeit(&mut self, kind: TransactionKind) {
        self.ledger.debit(kind, self.forfeit);
        tracing::info!(
            reason = ?kind,
            forfeit = self.forfeit,
            balance = self.ledger.balance(),
            "forfeit paid"
        );
    }

    fn show_balance(&mut self) -> Result<()> {
        self.console
            .print_line(&format!("Cash: {}", self.ledger.balance()))?;
        Ok(())
    }

    fn show_diagnostics(&mut self, car: &Car) -> Result<()> {
        self.console.print_line("")?;
        self.console.print_line("  Diagnostics:")?;
        for index in 0..car.len() {
            let part = car.part_at(index)?;
            let status = if part.is_broken() { "BROKEN" } else { "ok" };
            self.console
                .print_line(&format!("[{:^6}] {}", status, part.name()))?;
        }
        Ok(())
    }

    fn show_repair_options(&mut self, names: &[PartName]) -> Result<()> {
        self.console.print_line("")?;
        self.console.print_line("   Choose a part to replace:")?;
        for (index, &name) in names.iter().enumerate() {
            self.console.print_line(&format!(
                "{}. {}: {} in stock",
                index + 1,
                name,
                self.storage.quantity_of(name)
            ))?;
        }
        Ok(())
    }
}
