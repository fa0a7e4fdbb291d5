//! Contract violations
//!
//! A [`Violation`] names the rule that failed and the contract path it
//! failed at. The full violation list is always reported, sorted by
//! `(path, rule)` ascending so output is deterministic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One failed contract rule at one contract path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Stable rule id, e.g. `EAB_ASSERTION_WORD_LIMIT`
    pub rule: String,
    /// Contract path in wire-field terms, e.g. `executiveAssertionBlock[2].assertion`
    pub path: String,
    /// Rule-specific payload, e.g. `{"count": 6, "cap": 5}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl Violation {
    /// Create a violation without context
    #[inline]
    #[must_use]
    pub fn new(rule: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            path: path.into(),
            context: None,
        }
    }

    /// With a rule-specific context payload
    #[inline]
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// Sort violations into the canonical `(path ASC, rule ASC)` order.
///
/// The underlying sort is stable, so violations sharing both keys keep
/// their discovery order.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.rule.cmp(&b.rule)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_by_path_then_rule() {
        let mut violations = vec![
            Violation::new("B_RULE", "z.path"),
            Violation::new("B_RULE", "a.path"),
            Violation::new("A_RULE", "a.path"),
        ];
        sort_violations(&mut violations);
        assert_eq!(
            violations
                .iter()
                .map(|v| (v.path.as_str(), v.rule.as_str()))
                .collect::<Vec<_>>(),
            vec![("a.path", "A_RULE"), ("a.path", "B_RULE"), ("z.path", "B_RULE")]
        );
    }

    #[test]
    fn context_omitted_from_wire_when_absent() {
        let json = serde_json::to_value(Violation::new("A_RULE", "meta")).unwrap();
        assert!(json.get("context").is_none());
    }
}
