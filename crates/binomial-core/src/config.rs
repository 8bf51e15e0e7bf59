//! Pricing configuration.
//!
//! Settings that shape a pricing run without being market inputs: the
//! tolerance used to flag exercise-consistent nodes, how arbitrage
//! violations are treated and when batch pricing goes parallel.

use serde::{Deserialize, Serialize};

use crate::error::{LatticeResult, Validate, ValidationError};

/// How a risk-neutral probability outside (0, 1) is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArbitragePolicy {
    /// Price anyway without reporting.
    Ignore,
    /// Price anyway and log a warning.
    #[default]
    Warn,
    /// Fail the pricing call with `ArbitrageViolation`.
    Reject,
}

/// Configuration for lattice pricing runs.
///
/// # Example
///
/// ```rust
/// use binomial_core::{ArbitragePolicy, PricingConfig};
///
/// let config = PricingConfig::from_json(r#"{"arbitrage_policy": "reject"}"#).unwrap();
/// assert_eq!(config.arbitrage_policy, ArbitragePolicy::Reject);
/// assert_eq!(config.exercise_tolerance, 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Absolute tolerance under which a node's value is treated as equal to
    /// its intrinsic value.
    #[serde(default = "default_exercise_tolerance")]
    pub exercise_tolerance: f64,

    /// Treatment of up probabilities outside (0, 1).
    #[serde(default)]
    pub arbitrage_policy: ArbitragePolicy,

    /// Enable parallel batch pricing (requires the `parallel` feature).
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Minimum batch size before pricing runs in parallel.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_exercise_tolerance() -> f64 {
    1e-10
}

fn default_parallel() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    64
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            exercise_tolerance: default_exercise_tolerance(),
            arbitrage_policy: ArbitragePolicy::default(),
            parallel: default_parallel(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl PricingConfig {
    /// Strict configuration: arbitrage violations are errors.
    #[must_use]
    pub fn strict() -> Self {
        Self::default().with_arbitrage_policy(ArbitragePolicy::Reject)
    }

    /// Configuration that never prices in parallel.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Parses a JSON document and validates the result.
    ///
    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> LatticeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Sets the exercise tolerance.
    #[must_use]
    pub fn with_exercise_tolerance(mut self, tolerance: f64) -> Self {
        self.exercise_tolerance = tolerance;
        self
    }

    /// Sets the arbitrage policy.
    #[must_use]
    pub fn with_arbitrage_policy(mut self, policy: ArbitragePolicy) -> Self {
        self.arbitrage_policy = policy;
        self
    }

    /// Sets the parallel batch threshold.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if a batch of `count` requests should be priced in parallel.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        self.parallel && count >= self.parallel_threshold
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.exercise_tolerance.is_finite()
            || self.exercise_tolerance <= 0.0
            || self.exercise_tolerance > 1e-4
        {
            errors.push(ValidationError::new(
                "exercise_tolerance",
                format!(
                    "Exercise tolerance must be in (0, 1e-4], got {}",
                    self.exercise_tolerance
                ),
            ));
        }

        if self.parallel_threshold == 0 {
            errors.push(ValidationError::new(
                "parallel_threshold",
                "Parallel threshold must be at least 1",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LatticeError;

    #[test]
    fn test_default() {
        let config = PricingConfig::default();
        assert_eq!(config.exercise_tolerance, 1e-10);
        assert_eq!(config.arbitrage_policy, ArbitragePolicy::Warn);
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 64);
        assert!(config.is_valid());
    }

    #[test]
    fn test_presets() {
        assert_eq!(PricingConfig::strict().arbitrage_policy, ArbitragePolicy::Reject);
        assert!(!PricingConfig::sequential().parallel);
        assert!(!PricingConfig::sequential().should_parallelize(10_000));
    }

    #[test]
    fn test_should_parallelize() {
        let config = PricingConfig::default().with_parallel_threshold(10);
        assert!(!config.should_parallelize(9));
        assert!(config.should_parallelize(10));
    }

    #[test]
    fn test_from_json_defaults() {
        let config = PricingConfig::from_json("{}").unwrap();
        assert_eq!(config, PricingConfig::default());

        let config =
            PricingConfig::from_json(r#"{"exercise_tolerance": 1e-8, "parallel": false}"#).unwrap();
        assert_eq!(config.exercise_tolerance, 1e-8);
        assert!(!config.parallel);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let err = PricingConfig::from_json(r#"{"exercise_tolerance": 0.5}"#).unwrap_err();
        assert!(matches!(err, LatticeError::Validation { ref field, .. } if field == "exercise_tolerance"));

        let err = PricingConfig::from_json(
            r#"{"exercise_tolerance": -1.0, "parallel_threshold": 0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LatticeError::MultipleValidationErrors(ref e) if e.len() == 2));

        let err = PricingConfig::from_json(r#"{"arbitrage_policy": "panic"}"#).unwrap_err();
        assert!(matches!(err, LatticeError::Deserialization(_)));
    }

    #[test]
    fn test_serde_round_trip() {
        let config = PricingConfig::strict().with_exercise_tolerance(1e-9);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"reject\""));
        let back: PricingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
