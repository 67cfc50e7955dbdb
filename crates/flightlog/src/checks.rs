//! Manual checklist items.
//!
//! Some requirements can't be derived from logged hours (a 150 NM solo
//! cross-country, checkride prep inside a window). The pilot ticks these off
//! by hand; the state is a plain id → done map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A built-in checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Stable identifier, used as the key in [`ManualChecks`].
    pub id: &'static str,
    /// Human-readable description.
    pub label: &'static str,
}

/// The built-in checklist.
pub const CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        id: "ppl_solo_150nm",
        label: "PPL: Solo XC ≥150 NM total distance with 3 full-stop landings",
    },
    ChecklistItem {
        id: "ppl_night_tol",
        label: "PPL: Completed 10 night full-stop landings",
    },
    ChecklistItem {
        id: "ppl_checkride_prep",
        label: "PPL: 3 hrs checkride prep within 2 calendar months",
    },
    ChecklistItem {
        id: "ir_ifr_cc",
        label: "IR: IFR XC ≥250 NM with 3 types of approaches",
    },
    ChecklistItem {
        id: "ir_prep",
        label: "IR: 3 hrs checkride prep within 2 calendar months",
    },
    ChecklistItem {
        id: "cpl_300nm",
        label: "CPL: 300 NM solo XC with landings at 3 pts (one ≥250 NM leg)",
    },
];

/// Look up a built-in checklist item.
#[must_use]
pub fn checklist_item(id: &str) -> Option<&'static ChecklistItem> {
    CHECKLIST.iter().find(|item| item.id == id)
}

/// Completion state of checklist items, keyed by item id.
///
/// Ids are not validated against [`CHECKLIST`]; unknown ids are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualChecks(BTreeMap<String, bool>);

impl ManualChecks {
    /// Whether an item is marked done. Unset items are not done.
    #[must_use]
    pub fn is_done(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Return a copy with one item set.
    #[must_use]
    pub fn with(&self, id: &str, done: bool) -> Self {
        let mut next = self.clone();
        next.0.insert(id.to_string(), done);
        next
    }

    /// Number of built-in items marked done.
    #[must_use]
    pub fn completed(&self) -> usize {
        CHECKLIST.iter().filter(|item| self.is_done(item.id)).count()
    }

    /// Iterate over every stored entry.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_ids_unique() {
        let mut ids: Vec<_> = CHECKLIST.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CHECKLIST.len());
    }

    #[test]
    fn test_checklist_item_lookup() {
        assert!(checklist_item("ir_prep").is_some());
        assert!(checklist_item("nope").is_none());
    }

    #[test]
    fn test_with_and_is_done() {
        let checks = ManualChecks::default();
        assert!(!checks.is_done("ppl_night_tol"));

        let checks = checks.with("ppl_night_tol", true);
        assert!(checks.is_done("ppl_night_tol"));
        assert_eq!(checks.completed(), 1);

        let checks = checks.with("ppl_night_tol", false);
        assert!(!checks.is_done("ppl_night_tol"));
        assert_eq!(checks.completed(), 0);
    }

    #[test]
    fn test_unknown_ids_kept_but_not_counted() {
        let checks = ManualChecks::default().with("custom_item", true);
        assert!(checks.is_done("custom_item"));
        assert_eq!(checks.completed(), 0);
        assert_eq!(checks.iter().count(), 1);
    }

    #[test]
    fn test_json_is_flat_map() {
        let checks = ManualChecks::default().with("ir_prep", true);
        let json = serde_json::to_string(&checks).unwrap();
        assert_eq!(json, r#"{"ir_prep":true}"#);

        let back: ManualChecks = serde_json::from_str(&json).unwrap();
        assert_eq!(back, checks);
    }
}
