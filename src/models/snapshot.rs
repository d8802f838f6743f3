//! Snapshot document for manual backup and restore.

use serde::{Deserialize, Serialize};

use super::Gift;

/// Point-in-time export of the full gift list.
///
/// This is the wire format the export/import pair round-trips:
/// `{ gifts: [...], exportDate, coupleNames }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub gifts: Vec<Gift>,
    pub export_date: String,
    pub couple_names: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_wire_names() {
        let snapshot = Snapshot {
            gifts: vec![],
            export_date: "2025-06-01T12:00:00+00:00".to_string(),
            couple_names: "Cristiano & Luana".to_string(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["gifts"].is_array());
        assert_eq!(json["exportDate"], "2025-06-01T12:00:00+00:00");
        assert_eq!(json["coupleNames"], "Cristiano & Luana");
    }
}
