use super::{PolicyRule, INITIAL_DECISION, POLICY_RULES};
use crate::models::{Decision, Reading};
use serde::Serialize;

/// A rule that applied during evaluation, with the decision it left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule_id: &'static str,
    pub rule_name: &'static str,
    pub decision: Decision,
}

pub struct PolicyEngine {
    rules: &'static [&'static dyn PolicyRule],
}

impl PolicyEngine {
    pub fn new() -> Self {
        Self {
            rules: &POLICY_RULES,
        }
    }

    /// Fold the rules in order; the last rule that applies decides.
    pub fn evaluate(&self, reading: &Reading) -> Decision {
        self.rules.iter().fold(INITIAL_DECISION, |current, rule| {
            rule.apply(reading, &current).unwrap_or(current)
        })
    }

    /// Every rule that applied, in evaluation order. The last entry is the final decision.
    pub fn trace(&self, reading: &Reading) -> Vec<RuleOutcome> {
        let mut current = INITIAL_DECISION;
        let mut outcomes = Vec::new();

        for rule in self.rules {
            if let Some(decision) = rule.apply(reading, &current) {
                current = decision;
                outcomes.push(RuleOutcome {
                    rule_id: rule.id(),
                    rule_name: rule.name(),
                    decision,
                });
            }
        }

        outcomes
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}
