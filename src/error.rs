use thiserror::Error;

use crate::model::catalog::PartName;

/// Everything that can go wrong inside the shop.
///
/// Not every variant is fatal:
/// - `InvalidSelection` just means the operator has to type again
/// - `OutOfStock` is a normal business outcome (the customer gets turned away)
/// - `NoMatchOnSwap` and `IndexOutOfRange` mean the catalog, the storage and
///   the car disagree about which parts exist, so the session must stop
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("invalid selection: {input:?}")]
    InvalidSelection { input: String },

    #[error("no {part} left in storage")]
    OutOfStock { part: PartName },

    #[error("storage does not carry parts named {name:?}")]
    UnknownPart { name: String },

    #[error("car has no installed part matching {part}")]
    NoMatchOnSwap { part: PartName },

    #[error("part index {index} out of range (car has {len} parts)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShopError {
    /// Errors the loop recovers from without leaving the current round.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ShopError::InvalidSelection { .. } | ShopError::OutOfStock { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_outcomes_are_recoverable() {
        assert!(ShopError::InvalidSelection { input: "abc".into() }.is_recoverable());
        assert!(ShopError::OutOfStock { part: PartName::Brakes }.is_recoverable());
    }

    #[test]
    fn consistency_faults_are_fatal() {
        assert!(!ShopError::NoMatchOnSwap { part: PartName::Engine }.is_recoverable());
        assert!(!ShopError::IndexOutOfRange { index: 9, len: 7 }.is_recoverable());
    }

    #[test]
    fn messages_name_the_part() {
        let err = ShopError::OutOfStock { part: PartName::Wheels };
        assert_eq!(err.to_string(), "no Wheels left in storage");
    }
}
