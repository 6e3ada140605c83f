//! Status-code allow/ignore filtering for probe results

use crate::models::ProbeOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Decides which successful probes are persisted to the result sinks.
///
/// The allow-set and ignore-set are checked independently: a Success
/// passes when its status is in the allow-set (if one is given) and not
/// in the ignore-set (if one is given). A status present in both sets
/// is rejected. Failures never pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRule {
    pub allow: Option<HashSet<u16>>,
    pub ignore: Option<HashSet<u16>>,
}

impl FilterRule {
    pub fn new(allow: Option<HashSet<u16>>, ignore: Option<HashSet<u16>>) -> Self {
        Self { allow, ignore }
    }

    /// Returns true when the outcome should be recorded
    pub fn accept(&self, outcome: &ProbeOutcome) -> bool {
        let status = match outcome.status() {
            Some(s) => s,
            None => return false,
        };

        let allowed = self.allow.as_ref().is_none_or(|set| set.contains(&status));
        let ignored = self
            .ignore
            .as_ref()
            .is_some_and(|set| set.contains(&status));

        allowed && !ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureKind;

    fn success(status: u16) -> ProbeOutcome {
        ProbeOutcome::Success {
            status,
            headers: Vec::new(),
            body: String::new(),
            length: 0,
        }
    }

    fn failure() -> ProbeOutcome {
        ProbeOutcome::Failure {
            kind: FailureKind::Timeout,
            message: "timed out".to_string(),
        }
    }

    fn codes(list: &[u16]) -> Option<HashSet<u16>> {
        Some(list.iter().copied().collect())
    }

    #[test]
    fn test_unset_rule_accepts_every_success() {
        let rule = FilterRule::default();
        assert!(rule.accept(&success(200)));
        assert!(rule.accept(&success(404)));
        assert!(rule.accept(&success(500)));
    }

    #[test]
    fn test_failure_always_rejected() {
        assert!(!FilterRule::default().accept(&failure()));
        assert!(!FilterRule::new(codes(&[200]), codes(&[301])).accept(&failure()));
    }

    #[test]
    fn test_allow_and_ignore_together() {
        let rule = FilterRule::new(codes(&[200]), codes(&[301]));
        assert!(rule.accept(&success(200)));
        assert!(!rule.accept(&success(301)));
        assert!(!rule.accept(&success(404)));
    }

    #[test]
    fn test_allow_only() {
        let rule = FilterRule::new(codes(&[200, 301]), None);
        assert!(rule.accept(&success(301)));
        assert!(!rule.accept(&success(403)));
    }

    #[test]
    fn test_ignore_only() {
        let rule = FilterRule::new(None, codes(&[404]));
        assert!(rule.accept(&success(200)));
        assert!(!rule.accept(&success(404)));
    }

    #[test]
    fn test_ignore_wins_over_allow() {
        let rule = FilterRule::new(codes(&[200]), codes(&[200]));
        assert!(!rule.accept(&success(200)));
    }
}
