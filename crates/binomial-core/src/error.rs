//! Error types for lattice construction and option valuation.

use thiserror::Error;

/// A specialized Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors that can occur while deriving, building or valuing a lattice.
///
/// Every failure is local to the pricing call that raised it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// An input is outside its admissible domain.
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput {
        /// Name of the offending input.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The up and down factors coincide, so the risk-neutral probability
    /// is undefined.
    #[error("Degenerate market: up factor {up} does not exceed down factor {down}")]
    DegenerateMarket {
        /// Up-move multiplier.
        up: f64,
        /// Down-move multiplier.
        down: f64,
    },

    /// The risk-neutral up probability lies outside (0, 1).
    #[error("Arbitrage violation: up probability {prob_up} outside (0, 1) for dt = {dt}")]
    ArbitrageViolation {
        /// Derived up probability.
        prob_up: f64,
        /// Step length in years.
        dt: f64,
    },

    /// A configuration field failed validation.
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Several configuration fields failed validation.
    #[error("Multiple validation errors: {0:?}")]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Configuration could not be parsed.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl LatticeError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a degenerate market error.
    #[must_use]
    pub fn degenerate_market(up: f64, down: f64) -> Self {
        Self::DegenerateMarket { up, down }
    }

    /// Creates an arbitrage violation error.
    #[must_use]
    pub fn arbitrage_violation(prob_up: f64, dt: f64) -> Self {
        Self::ArbitrageViolation { prob_up, dt }
    }
}

impl From<serde_json::Error> for LatticeError {
    fn from(err: serde_json::Error) -> Self {
        LatticeError::Deserialization(err.to_string())
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> LatticeResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(LatticeError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(LatticeError::MultipleValidationErrors(errors)),
        }
    }
}

/// Rejects NaN and infinite inputs.
pub(crate) fn require_finite(field: &str, value: f64) -> LatticeResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LatticeError::invalid_input(field, format!("must be finite, got {value}")))
    }
}

/// Rejects non-finite and non-positive inputs.
pub(crate) fn require_positive(field: &str, value: f64) -> LatticeResult<f64> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(LatticeError::invalid_input(field, format!("must be positive, got {value}")))
    }
}
