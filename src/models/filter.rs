//! Display filter for the gift list.

use serde::{Deserialize, Serialize};

/// Transient view selector. Never persisted; a fresh process starts at `All`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Available,
    Reserved,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Available => "available",
            Filter::Reserved => "reserved",
        }
    }

    /// Strict parse: unknown values are rejected, not passed through.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Filter::All),
            "available" => Some(Filter::Available),
            "reserved" => Some(Filter::Reserved),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(Filter::from_str("all"), Some(Filter::All));
        assert_eq!(Filter::from_str("available"), Some(Filter::Available));
        assert_eq!(Filter::from_str("reserved"), Some(Filter::Reserved));
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert_eq!(Filter::from_str("taken"), None);
        assert_eq!(Filter::from_str("All"), None);
        assert_eq!(Filter::from_str(""), None);
    }
}
