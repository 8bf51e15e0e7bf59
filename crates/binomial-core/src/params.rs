//! Cox-Ross-Rubinstein lattice parameters.
//!
//! For a horizon `T` split into `n` steps:
//!
//! ```text
//! dt     = T / n
//! u      = exp(σ √dt)
//! d      = 1 / u
//! q_up   = (exp((r - c) dt) - d) / (u - d)
//! q_down = 1 - q_up
//! R      = exp(r dt)
//! ```
//!
//! The tree recombines because `d` is exactly the reciprocal of `u`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::ArbitragePolicy;
use crate::error::{require_finite, require_positive, LatticeError, LatticeResult};

/// Parameters shared by every node of one lattice.
///
/// Derived once per pricing run and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParams {
    /// Number of time steps.
    pub steps: usize,
    /// Step length in years.
    pub dt: f64,
    /// Up-move multiplier.
    pub up: f64,
    /// Down-move multiplier, `1 / up`.
    pub down: f64,
    /// Risk-neutral probability of an up move.
    pub prob_up: f64,
    /// Risk-neutral probability of a down move.
    pub prob_down: f64,
    /// One-step growth factor `exp(r dt)`; continuation values are divided by it.
    pub growth: f64,
}

impl LatticeParams {
    /// Derives the parameters for `steps` periods over `maturity` years.
    ///
    /// # Arguments
    ///
    /// * `maturity` - Horizon in years, positive
    /// * `steps` - Number of periods, at least 1
    /// * `volatility` - Annualized volatility, non-negative
    /// * `rate` - Continuously compounded risk-free rate
    /// * `dividend_yield` - Continuous yield or cost of carry
    ///
    /// # Errors
    ///
    /// `InvalidInput` for out-of-domain arguments and `DegenerateMarket`
    /// when the up and down factors coincide (zero volatility). The
    /// arbitrage condition is not checked here; see
    /// [`LatticeParams::check_arbitrage`].
    pub fn derive(
        maturity: f64,
        steps: usize,
        volatility: f64,
        rate: f64,
        dividend_yield: f64,
    ) -> LatticeResult<Self> {
        require_positive("maturity", maturity)?;
        require_finite("volatility", volatility)?;
        require_finite("rate", rate)?;
        require_finite("dividend_yield", dividend_yield)?;
        if steps == 0 {
            return Err(LatticeError::invalid_input("steps", "must be at least 1"));
        }
        if volatility < 0.0 {
            return Err(LatticeError::invalid_input(
                "volatility",
                format!("must be non-negative, got {volatility}"),
            ));
        }

        let dt = maturity / steps as f64;
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        if up <= down {
            return Err(LatticeError::degenerate_market(up, down));
        }

        let prob_up = (((rate - dividend_yield) * dt).exp() - down) / (up - down);
        let params = Self {
            steps,
            dt,
            up,
            down,
            prob_up,
            prob_down: 1.0 - prob_up,
            growth: (rate * dt).exp(),
        };

        debug!(
            "derived lattice parameters: steps={}, dt={:.6}, u={:.8}, q_up={:.8}",
            steps, dt, up, prob_up
        );
        Ok(params)
    }

    /// Returns true if the up probability lies strictly inside (0, 1).
    #[must_use]
    pub fn is_arbitrage_free(&self) -> bool {
        self.prob_up > 0.0 && self.prob_up < 1.0
    }

    /// Applies `policy` to the arbitrage condition.
    ///
    /// `Reject` turns a violation into an error, `Warn` logs it and
    /// `Ignore` does nothing.
    pub fn check_arbitrage(&self, policy: ArbitragePolicy) -> LatticeResult<()> {
        if self.is_arbitrage_free() {
            return Ok(());
        }
        match policy {
            ArbitragePolicy::Ignore => Ok(()),
            ArbitragePolicy::Warn => {
                warn!(
                    "up probability {} outside (0, 1) at dt={}; step is too coarse for the rate, yield and volatility",
                    self.prob_up, self.dt
                );
                Ok(())
            }
            ArbitragePolicy::Reject => {
                Err(LatticeError::arbitrage_violation(self.prob_up, self.dt))
            }
        }
    }

    /// Horizon covered by the lattice in years.
    #[must_use]
    pub fn horizon(&self) -> f64 {
        self.steps as f64 * self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_three_step_parameters() {
        let p = LatticeParams::derive(1.0, 3, 0.2, 0.05, 0.0).unwrap();

        assert_relative_eq!(p.dt, 1.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(p.up, 1.1224009024456676, epsilon = 1e-12);
        assert_relative_eq!(p.down, 0.8909472522884107, epsilon = 1e-12);
        assert_relative_eq!(p.prob_up, 0.5437765963610321, epsilon = 1e-12);
        assert_relative_eq!(p.prob_down, 0.45622340363896785, epsilon = 1e-12);
        assert_relative_eq!(p.growth, 1.016806330386261, epsilon = 1e-12);
    }

    #[test]
    fn test_recombining() {
        let p = LatticeParams::derive(2.0, 50, 0.35, 0.03, 0.01).unwrap();
        assert_eq!(p.down, 1.0 / p.up);
        assert_relative_eq!(p.prob_up + p.prob_down, 1.0, epsilon = 1e-15);
        assert_relative_eq!(p.horizon(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_risk_neutral_drift() {
        // q u + (1 - q) d must reproduce the carry-adjusted growth
        let p = LatticeParams::derive(1.0, 12, 0.25, 0.04, 0.015).unwrap();
        let expected = ((0.04 - 0.015) * p.dt).exp();
        assert_relative_eq!(
            p.prob_up * p.up + p.prob_down * p.down,
            expected,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_zero_volatility_is_degenerate() {
        let err = LatticeParams::derive(1.0, 10, 0.0, 0.05, 0.0).unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateMarket { .. }));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            LatticeParams::derive(1.0, 0, 0.2, 0.05, 0.0),
            Err(LatticeError::InvalidInput { .. })
        ));
        assert!(matches!(
            LatticeParams::derive(0.0, 10, 0.2, 0.05, 0.0),
            Err(LatticeError::InvalidInput { .. })
        ));
        assert!(matches!(
            LatticeParams::derive(-1.0, 10, 0.2, 0.05, 0.0),
            Err(LatticeError::InvalidInput { .. })
        ));
        assert!(matches!(
            LatticeParams::derive(1.0, 10, -0.2, 0.05, 0.0),
            Err(LatticeError::InvalidInput { .. })
        ));
        assert!(matches!(
            LatticeParams::derive(1.0, 10, 0.2, f64::NAN, 0.0),
            Err(LatticeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_arbitrage_policy() {
        // One coarse step with a large carry pushes q_up above 1
        let p = LatticeParams::derive(1.0, 1, 0.05, 0.50, 0.0).unwrap();
        assert!(!p.is_arbitrage_free());
        assert!(p.prob_up > 1.0);

        assert!(p.check_arbitrage(ArbitragePolicy::Ignore).is_ok());
        assert!(p.check_arbitrage(ArbitragePolicy::Warn).is_ok());
        assert!(matches!(
            p.check_arbitrage(ArbitragePolicy::Reject),
            Err(LatticeError::ArbitrageViolation { .. })
        ));

        let fine = LatticeParams::derive(1.0, 100, 0.2, 0.05, 0.0).unwrap();
        assert!(fine.check_arbitrage(ArbitragePolicy::Reject).is_ok());
    }

    proptest::proptest! {
        #[test]
        fn prop_probabilities_reproduce_carry(
            maturity in 0.05f64..5.0,
            steps in 1usize..500,
            volatility in 0.01f64..1.0,
            rate in -0.02f64..0.15,
            dividend_yield in 0.0f64..0.1,
        ) {
            let p = LatticeParams::derive(maturity, steps, volatility, rate, dividend_yield).unwrap();
            let growth = ((rate - dividend_yield) * p.dt).exp();
            proptest::prop_assert!((p.prob_up * p.up + p.prob_down * p.down - growth).abs() < 1e-12);
            proptest::prop_assert!((p.prob_up + p.prob_down - 1.0).abs() < 1e-15);
            proptest::prop_assert!(p.up > 1.0 && p.down < 1.0);
        }
    }
}
