//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::Deserialize;

/// Item type identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new ItemId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the item ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Location identifier (the unit security ratings and routes are keyed on).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(String);

impl LocationId {
    /// Create a new LocationId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the location ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LocationId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for LocationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for LocationId {
    fn from(id: u64) -> Self {
        Self::new(id.to_string())
    }
}

/// Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(String);

impl RegionId {
    /// Create a new RegionId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the region ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RegionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier as it appears in snapshot files: either a bare number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

impl From<RawId> for LocationId {
    fn from(raw: RawId) -> Self {
        Self::new(String::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_new_and_as_str() {
        let id = ItemId::new("34");
        assert_eq!(id.as_str(), "34");
    }

    #[test]
    fn item_id_display() {
        let id = ItemId::from("display-test".to_string());
        assert_eq!(format!("{}", id), "display-test");
    }

    #[test]
    fn location_id_from_number() {
        let id = LocationId::from(30000142_u64);
        assert_eq!(id.as_str(), "30000142");
    }

    #[test]
    fn location_ids_order_lexically() {
        let a = LocationId::from("a");
        let b = LocationId::from("b");
        assert!(a < b);
    }

    #[test]
    fn region_id_from_str() {
        let id = RegionId::from("10000002");
        assert_eq!(id.to_string(), "10000002");
    }

    #[test]
    fn raw_id_accepts_numbers_and_strings() {
        let ids: Vec<RawId> = serde_json::from_str(r#"[30000142, "30002187"]"#).unwrap();
        let ids: Vec<LocationId> = ids.into_iter().map(LocationId::from).collect();
        assert_eq!(ids[0].as_str(), "30000142");
        assert_eq!(ids[1].as_str(), "30002187");
    }
}
