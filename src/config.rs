use serde::{Deserialize, Serialize};

use crate::errors::{AmortizationError, Result};
use crate::types::RateConvention;

/// upper bound on simulated payments before a simulation is abandoned
pub const DEFAULT_MAX_PERIODS: u32 = 100_000;

/// engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// payments simulated before reporting non-convergence
    #[serde(default = "default_max_periods")]
    pub max_periods: u32,
    /// divisor used for the periodic rate of the level payment
    #[serde(default)]
    pub rate_convention: RateConvention,
    /// check loan invariants before every calculation
    #[serde(default = "default_validate_loans")]
    pub validate_loans: bool,
}

fn default_max_periods() -> u32 {
    DEFAULT_MAX_PERIODS
}

fn default_validate_loans() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_periods: DEFAULT_MAX_PERIODS,
            rate_convention: RateConvention::FixedMonthly,
            validate_loans: true,
        }
    }
}

impl EngineConfig {
    /// level payment derived with the loan's own payment frequency
    pub fn frequency_aware() -> Self {
        Self {
            rate_convention: RateConvention::PaymentsPerYear,
            ..Self::default()
        }
    }

    /// trust callers to supply loans that already satisfy the invariants
    pub fn unchecked() -> Self {
        Self {
            validate_loans: false,
            ..Self::default()
        }
    }

    pub fn with_max_periods(mut self, max_periods: u32) -> Self {
        self.max_periods = max_periods;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_periods == 0 {
            return Err(AmortizationError::InvalidConfiguration {
                message: "max_periods must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_fixed_monthly_divisor() {
        let config = EngineConfig::default();
        assert_eq!(config.rate_convention, RateConvention::FixedMonthly);
        assert_eq!(config.max_periods, DEFAULT_MAX_PERIODS);
        assert!(config.validate_loans);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{"rate_convention":"PaymentsPerYear"}"#).unwrap();
        assert_eq!(config, EngineConfig::frequency_aware());

        let back = EngineConfig::from_json(&config.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_zero_cap_rejected() {
        let result = EngineConfig::from_json(r#"{"max_periods":0}"#);
        assert!(matches!(result, Err(AmortizationError::InvalidConfiguration { .. })));

        let bad_json = EngineConfig::from_json("{not json");
        assert!(matches!(bad_json, Err(AmortizationError::Serialization(_))));
    }
}
