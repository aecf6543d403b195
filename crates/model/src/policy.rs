use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationDecision {
    RequireBan,
    RequireNoChange,
}

/// Maps accumulated warning count to the member status
/// the count requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationPolicy {
    threshold: i64,
}

impl EscalationPolicy {
    pub const DEFAULT_THRESHOLD: i64 = 3;

    /// Returns None if threshold is less than 1.
    pub fn new(threshold: i64) -> Option<Self> {
        if threshold < 1 {
            None
        } else {
            Some(Self { threshold })
        }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn decide(&self, warning_count: i64) -> EscalationDecision {
        if warning_count >= self.threshold {
            EscalationDecision::RequireBan
        } else {
            EscalationDecision::RequireNoChange
        }
    }

    pub fn automatic_ban_reason(&self) -> String {
        format!("automatic ban: {} warnings", self.threshold)
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

/// How activation affects warnings counted by [EscalationPolicy].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactivationWarningPolicy {
    /// All previous warnings keep counting towards the next ban.
    #[default]
    Retain,
    /// Escalation counts only warnings issued after the activation.
    Reset,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateReportPolicy {
    /// Every report submission creates a new report.
    Allow,
    /// Submitting a report for content which the same reporter has already
    /// reported and which is still pending returns the existing report.
    #[default]
    ReturnExisting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_bans_at_three_warnings() {
        let policy = EscalationPolicy::default();
        assert_eq!(policy.decide(0), EscalationDecision::RequireNoChange);
        assert_eq!(policy.decide(2), EscalationDecision::RequireNoChange);
        assert_eq!(policy.decide(3), EscalationDecision::RequireBan);
        assert_eq!(policy.decide(4), EscalationDecision::RequireBan);
    }

    #[test]
    fn threshold_must_be_positive() {
        assert!(EscalationPolicy::new(0).is_none());
        assert!(EscalationPolicy::new(-1).is_none());
        assert_eq!(
            EscalationPolicy::new(1).map(|p| p.decide(1)),
            Some(EscalationDecision::RequireBan)
        );
    }

    #[test]
    fn automatic_ban_reason_contains_threshold() {
        assert_eq!(
            EscalationPolicy::default().automatic_ban_reason(),
            "automatic ban: 3 warnings"
        );
    }
}
