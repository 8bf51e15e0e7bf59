//! Domain types for option contracts and market inputs.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_positive, LatticeError, LatticeResult};

/// The right conveyed by an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionRight {
    /// Right to buy the underlying at the strike.
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionRight {
    /// Returns the payoff sign: `+1` for calls, `-1` for puts.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            OptionRight::Call => 1.0,
            OptionRight::Put => -1.0,
        }
    }

    /// Parses a `+1` / `-1` call-put flag.
    ///
    /// # Example
    ///
    /// ```rust
    /// use binomial_core::OptionRight;
    ///
    /// assert_eq!(OptionRight::from_sign(1.0).unwrap(), OptionRight::Call);
    /// assert_eq!(OptionRight::from_sign(-1.0).unwrap(), OptionRight::Put);
    /// assert!(OptionRight::from_sign(0.5).is_err());
    /// ```
    pub fn from_sign(cp: f64) -> LatticeResult<Self> {
        if cp == 1.0 {
            Ok(OptionRight::Call)
        } else if cp == -1.0 {
            Ok(OptionRight::Put)
        } else {
            Err(LatticeError::invalid_input(
                "cp",
                format!("call/put flag must be +1 or -1, got {cp}"),
            ))
        }
    }

    /// Immediate exercise value `sign * (underlying - strike)`.
    ///
    /// Not floored at zero; negative values mean exercising loses money.
    #[must_use]
    pub fn exercise_value(self, underlying: f64, strike: f64) -> f64 {
        self.sign() * (underlying - strike)
    }

    /// Terminal payoff `max(0, sign * (underlying - strike))`.
    #[must_use]
    pub fn payoff(self, underlying: f64, strike: f64) -> f64 {
        self.exercise_value(underlying, strike).max(0.0)
    }
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionRight::Call => write!(f, "Call"),
            OptionRight::Put => write!(f, "Put"),
        }
    }
}

/// When the holder may exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseStyle {
    /// Exercise at expiry only.
    European,
    /// Exercise at any lattice step up to expiry.
    American,
}

/// What the option is written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Underlying {
    /// The spot asset itself.
    Stock,
    /// A futures contract whose own lattice has `steps` periods.
    ///
    /// The option's step count must not exceed this.
    Futures {
        /// Number of periods until the futures contract matures.
        steps: usize,
    },
}

/// Contract terms of an option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Time to maturity in years. For futures options this is the maturity
    /// of the futures contract.
    pub maturity: f64,
    /// Strike price.
    pub strike: f64,
    /// Call or put.
    pub right: OptionRight,
}

impl OptionContract {
    /// Creates a new contract.
    #[must_use]
    pub fn new(maturity: f64, strike: f64, right: OptionRight) -> Self {
        Self {
            maturity,
            strike,
            right,
        }
    }

    /// Checks that maturity and strike are positive and finite.
    pub fn ensure_valid(&self) -> LatticeResult<()> {
        require_positive("maturity", self.maturity)?;
        require_positive("strike", self.strike)?;
        Ok(())
    }
}

/// Market state used to parameterize the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Initial underlying price.
    pub spot: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Continuous dividend yield or cost of carry.
    #[serde(default)]
    pub dividend_yield: f64,
    /// Annualized volatility.
    pub volatility: f64,
}

impl MarketData {
    /// Creates a new market snapshot.
    #[must_use]
    pub fn new(spot: f64, rate: f64, dividend_yield: f64, volatility: f64) -> Self {
        Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        }
    }

    /// Checks that spot is positive, volatility non-negative and every
    /// field finite.
    pub fn ensure_valid(&self) -> LatticeResult<()> {
        require_positive("spot", self.spot)?;
        require_finite("rate", self.rate)?;
        require_finite("dividend_yield", self.dividend_yield)?;
        require_finite("volatility", self.volatility)?;
        if self.volatility < 0.0 {
            return Err(LatticeError::invalid_input(
                "volatility",
                format!("must be non-negative, got {}", self.volatility),
            ));
        }
        Ok(())
    }
}
