use super::catalog::PartName;

/// Why money moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Customer paid for a successful repair
    RepairPayment(PartName),
    /// Shop paid for swapping out a part that was working
    DamageRefund(PartName),
    /// Shop turned the customer away
    RefusalForfeit,
    /// Requested part was not in storage
    OutOfStockForfeit(PartName),
}

/// One entry in the cash book. Positive amounts are income.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: i64,
}

/// The shop's cash register.
/// Starts at zero and is allowed to go negative.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balance: i64,
    history: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn credit(&mut self, kind: TransactionKind, amount: u32) {
        self.record(kind, i64::from(amount));
    }

    pub fn debit(&mut self, kind: TransactionKind, amount: u32) {
        self.record(kind, -i64::from(amount));
    }

    fn record(&mut self, kind: TransactionKind, amount: i64) {
        self.balance += amount;
        self.history.push(Transaction { kind, amount });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance(), 0);
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn balance_can_go_negative() {
        let mut ledger = Ledger::new();
        ledger.debit(TransactionKind::RefusalForfeit, 100);
        ledger.debit(TransactionKind::DamageRefund(PartName::Brakes), 500);
        assert_eq!(ledger.balance(), -600);
    }

    #[test]
    fn history_keeps_signed_amounts_in_order() {
        let mut ledger = Ledger::new();
        ledger.credit(TransactionKind::RepairPayment(PartName::Engine), 700);
        ledger.debit(TransactionKind::OutOfStockForfeit(PartName::Wheels), 100);

        assert_eq!(ledger.balance(), 600);
        assert_eq!(
            ledger.history(),
            &[
                Transaction {
                    kind: TransactionKind::RepairPayment(PartName::Engine),
                    amount: 700,
                },
                Transaction {
                    kind: TransactionKind::OutOfStockForfeit(PartName::Wheels),
                    amount: -100,
                },
            ]
        );
    }
}
