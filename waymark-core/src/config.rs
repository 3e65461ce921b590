//! Engine configuration built once at start-up and shared by reference.
//!
//! [`EngineConfig`] gathers the tier table, the budget heuristics, the
//! default-summary rates and the routing time budgets so no component reads
//! ambient constants.

use thiserror::Error;

use crate::{BudgetParameters, DistanceConfig, SummaryRates, TierTable};

/// Errors raised while building engine configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A count that divides the itinerary was zero.
    #[error("{field} must be at least 1")]
    ZeroCount {
        /// Name of the rejected parameter.
        field: &'static str,
    },
    /// A rate was negative, NaN or infinite.
    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidRate {
        /// Name of the rejected parameter.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Immutable configuration for every engine component.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use waymark_core::{DistanceConfig, EngineConfig, TierTable};
///
/// let config = EngineConfig::default()
///     .with_tiers(TierTable::standard())
///     .with_distance(DistanceConfig::default().with_overall_timeout(Duration::from_secs(30)));
/// assert_eq!(config.tiers.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    /// Budget tiers, cheapest first.
    pub tiers: TierTable,
    /// Heuristics used by the budget model.
    pub budget: BudgetParameters,
    /// Flat rates used by the default budget summary.
    pub summary: SummaryRates,
    /// Time budgets for routing lookups.
    pub distance: DistanceConfig,
}

impl EngineConfig {
    /// Replace the tier table.
    #[must_use]
    pub fn with_tiers(mut self, tiers: TierTable) -> Self {
        self.tiers = tiers;
        self
    }

    /// Replace the budget heuristics.
    #[must_use]
    pub const fn with_budget(mut self, budget: BudgetParameters) -> Self {
        self.budget = budget;
        self
    }

    /// Replace the default-summary rates.
    #[must_use]
    pub const fn with_summary(mut self, summary: SummaryRates) -> Self {
        self.summary = summary;
        self
    }

    /// Replace the routing time budgets.
    #[must_use]
    pub const fn with_distance(mut self, distance: DistanceConfig) -> Self {
        self.distance = distance;
        self
    }
}

/// Reject a rate that is negative or not finite.
pub(crate) fn validate_rate(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidRate { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::NEG_INFINITY)]
    fn rejects_invalid_rates(#[case] value: f64) {
        assert!(matches!(
            validate_rate("misc rate", value),
            Err(ConfigError::InvalidRate {
                field: "misc rate",
                ..
            })
        ));
    }

    #[rstest]
    fn default_config_uses_standard_tiers() {
        let config = EngineConfig::default();
        assert_eq!(config.tiers, TierTable::standard());
        assert_eq!(config.distance, DistanceConfig::default());
    }
}
