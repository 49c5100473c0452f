//! Diff calculation between the current and previously observed id sets.
//!
//! Only additions are reported; records that disappeared from the source are
//! silently dropped. The result is sorted so runs are deterministic.

use std::collections::HashSet;

/// Identifiers present in `current` but absent from `previous`.
pub fn detect(current: &HashSet<String>, previous: &HashSet<String>) -> Vec<String> {
    let mut added: Vec<String> = current.difference(previous).cloned().collect();
    added.sort();
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_changes() {
        let current = ids(&["rec1", "rec2"]);
        assert!(detect(&current, &current.clone()).is_empty());
    }

    #[test]
    fn test_additions() {
        let previous = ids(&["rec1"]);
        let current = ids(&["rec1", "rec2", "rec3"]);

        assert_eq!(detect(&current, &previous), vec!["rec2", "rec3"]);
    }

    #[test]
    fn test_removals_not_reported() {
        let previous = ids(&["rec1", "rec2"]);
        let current = ids(&["rec1"]);

        assert!(detect(&current, &previous).is_empty());
    }

    #[test]
    fn test_empty_previous_reports_everything() {
        let previous = HashSet::new();
        let current = ids(&["rec1", "rec2"]);

        assert_eq!(detect(&current, &previous), vec!["rec1", "rec2"]);
    }

    #[test]
    fn test_empty_current() {
        let previous = ids(&["rec1", "rec2"]);
        let current = HashSet::new();

        assert!(detect(&current, &previous).is_empty());
    }

    #[test]
    fn test_disjoint_sets() {
        let previous = ids(&["rec1"]);
        let current = ids(&["rec9"]);

        assert_eq!(detect(&current, &previous), vec!["rec9"]);
    }
}
