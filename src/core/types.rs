use serde::{Deserialize, Serialize};

/// Pregnancy-safety verdict tier.
///
/// Variants are ordered by severity, so `max()` over a set of statuses yields
/// the dominant one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStatus {
    Safe,
    Caution,
    Unsafe,
}

impl SafetyStatus {
    /// User-facing headline for this status
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Self::Safe => "Safe during pregnancy",
            Self::Caution => "Consume with caution during pregnancy",
            Self::Unsafe => "Not safe during pregnancy!",
        }
    }
}

impl std::fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Caution => write!(f, "caution"),
            Self::Unsafe => write!(f, "unsafe"),
        }
    }
}

/// Tier a rule-table term assigns when it is found in product text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Unsafe,
    Caution,
}

impl From<RiskTier> for SafetyStatus {
    fn from(tier: RiskTier) -> Self {
        match tier {
            RiskTier::Unsafe => Self::Unsafe,
            RiskTier::Caution => Self::Caution,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        SafetyStatus::from(*self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_dominance_order() {
        assert!(SafetyStatus::Unsafe > SafetyStatus::Caution);
        assert!(SafetyStatus::Caution > SafetyStatus::Safe);
        let dominant = [SafetyStatus::Caution, SafetyStatus::Unsafe, SafetyStatus::Safe]
            .into_iter()
            .max();
        assert_eq!(dominant, Some(SafetyStatus::Unsafe));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&SafetyStatus::Caution).unwrap();
        assert_eq!(json, "\"caution\"");
        let tier: RiskTier = serde_json::from_str("\"unsafe\"").unwrap();
        assert_eq!(tier, RiskTier::Unsafe);
    }

    #[test]
    fn test_tier_display_matches_status() {
        assert_eq!(RiskTier::Caution.to_string(), "caution");
        assert_eq!(SafetyStatus::from(RiskTier::Unsafe), SafetyStatus::Unsafe);
    }
}
