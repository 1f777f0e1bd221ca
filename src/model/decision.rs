//! Turning operator input into shop decisions
//!
//! The console hands us raw text. Which literal strings mean "refuse" and
//! "exit" comes from the config; this module only maps them onto signals.

use super::catalog::PartName;
use crate::error::{Result, ShopError};

/// What the operator decided to do with the car on the lift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Turn the customer away and pay the forfeit
    Refuse,
    /// Replace this part
    Replace(PartName),
}

/// Literal inputs bound to the refuse and exit signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandKeys {
    pub refuse: String,
    pub exit: char,
}

impl Default for CommandKeys {
    fn default() -> Self {
        CommandKeys {
            refuse: "r".to_string(),
            exit: 'q',
        }
    }
}

impl CommandKeys {
    /// Resolve one line typed at the repair prompt.
    ///
    /// Menu numbers are 1-based: "1" is the first name in `names` and
    /// `names.len()` is the last valid entry. An empty line is NOT a refusal.
    pub fn resolve_decision(&self, input: &str, names: &[PartName]) -> Result<Decision> {
        let trimmed = input.trim();

        if !trimmed.is_empty() && trimmed == self.refuse {
            return Ok(Decision::Refuse);
        }

        match trimmed.parse::<usize>() {
            Ok(number) if number >= 1 && number <= names.len() => {
                Ok(Decision::Replace(names[number - 1]))
            }
            _ => Err(ShopError::InvalidSelection {
                input: input.to_string(),
            }),
        }
    }

    /// Whether a key pressed at the "continue?" prompt ends the session
    pub fn is_exit(&self, key: char) -> bool {
        key == self.exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::CATALOG;

    #[test]
    fn numbers_are_one_based() {
        let keys = CommandKeys::default();
        assert_eq!(
            keys.resolve_decision("3", &CATALOG).unwrap(),
            Decision::Replace(CATALOG[2])
        );
        assert_eq!(
            keys.resolve_decision("1", &CATALOG).unwrap(),
            Decision::Replace(PartName::Engine)
        );
        assert_eq!(
            keys.resolve_decision("7", &CATALOG).unwrap(),
            Decision::Replace(PartName::Electronics)
        );
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        let keys = CommandKeys::default();
        for input in ["0", "8", "abc", "-1", "", "   ", "3.0"] {
            assert!(
                matches!(
                    keys.resolve_decision(input, &CATALOG),
                    Err(ShopError::InvalidSelection { .. })
                ),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn refusal_uses_configured_command() {
        let keys = CommandKeys {
            refuse: "no".to_string(),
            exit: 'x',
        };
        assert_eq!(keys.resolve_decision("no", &CATALOG).unwrap(), Decision::Refuse);
        assert_eq!(keys.resolve_decision(" no\n", &CATALOG).unwrap(), Decision::Refuse);
        assert!(keys.resolve_decision("r", &CATALOG).is_err());
    }

    #[test]
    fn exit_key_matches_exactly() {
        let keys = CommandKeys::default();
        assert!(keys.is_exit('q'));
        assert!(!keys.is_exit('Q'));
        assert!(!keys.is_exit('\n'));
    }
}
