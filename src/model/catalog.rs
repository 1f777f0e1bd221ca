use std::fmt;

/// Every kind of part the shop knows how to replace.
///
/// The declaration order IS the catalog order: menus are numbered in this
/// order and `Ord` follows it, so a `BTreeMap<PartName, _>` iterates the
/// same way the operator sees the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartName {
    Engine,
    Transmission,
    Suspension,
    Steering,
    Wheels,
    Brakes,
    Electronics,
}

/// The fixed catalog, in display order
pub const CATALOG: [PartName; 7] = [
    PartName::Engine,
    PartName::Transmission,
    PartName::Suspension,
    PartName::Steering,
    PartName::Wheels,
    PartName::Brakes,
    PartName::Electronics,
];

impl PartName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartName::Engine => "Engine",
            PartName::Transmission => "Transmission",
            PartName::Suspension => "Suspension",
            PartName::Steering => "Steering",
            PartName::Wheels => "Wheels",
            PartName::Brakes => "Brakes",
            PartName::Electronics => "Electronics",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<PartName> {
        CATALOG
            .iter()
            .copied()
            .find(|part| part.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
