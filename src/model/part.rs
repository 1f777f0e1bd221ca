use super::catalog::PartName;

/// A single physical part, either installed in a car or waiting in storage.
/// Two parts with the same name are interchangeable; there is no serial number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    name: PartName,
    is_broken: bool,
}

impl Part {
    /// Create a working part
    pub fn new(name: PartName) -> Self {
        Part {
            name,
            is_broken: false,
        }
    }

    pub fn name(&self) -> PartName {
        self.name
    }

    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    /// Mark this part as broken.
    /// Breaking an already broken part changes nothing.
    pub fn break_down(&mut self) {
        self.is_broken = true;
    }
}
