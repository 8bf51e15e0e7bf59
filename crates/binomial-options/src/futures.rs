//! Options on futures.
//!
//! The futures contract matures at `maturity` after `futures_steps` periods.
//! Lattice parameters are derived on that grid, the spot tree is rolled into
//! a futures tree and the option, expiring at step `option_steps`, is valued
//! over the futures prices.

use binomial_core::lattice::ensure_fits;
use binomial_core::{
    ExerciseStyle, FuturesLattice, LatticeError, LatticeParams, LatticeResult, MarketData,
    OptionContract, OptionRight, PricingConfig, Validate,
};

use crate::engine::{self, Payoff, Valuation};

/// Prices an option on a futures contract.
///
/// # Arguments
///
/// * `contract` - Option terms; `maturity` is the futures maturity
/// * `market` - Spot market the futures contract is written on
/// * `option_steps` - Periods until option expiry, at most `futures_steps`
/// * `futures_steps` - Periods until futures maturity
/// * `style` - European or American
/// * `config` - Pricing configuration
pub fn price_futures_option(
    contract: &OptionContract,
    market: &MarketData,
    option_steps: usize,
    futures_steps: usize,
    style: ExerciseStyle,
    config: &PricingConfig,
) -> LatticeResult<Valuation> {
    config.validate_or_error()?;
    contract.ensure_valid()?;
    market.ensure_valid()?;
    if futures_steps == 0 {
        return Err(LatticeError::invalid_input(
            "futures_steps",
            "must be at least 1",
        ));
    }
    ensure_fits(option_steps, futures_steps)?;

    let params = LatticeParams::derive(
        contract.maturity,
        futures_steps,
        market.volatility,
        market.rate,
        market.dividend_yield,
    )?;
    params.check_arbitrage(config.arbitrage_policy)?;

    let futures = FuturesLattice::build(market.spot, &params)?;
    engine::value(
        futures.nodes(),
        option_steps,
        &Payoff::from(contract),
        &params,
        style,
        config,
    )
}

/// American futures option: `(price, earliest exercise step)`.
///
/// `cp` is `+1` for a call and `-1` for a put; anything else is rejected.
pub fn futures_option_american(
    maturity: f64,
    option_steps: usize,
    futures_steps: usize,
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    strike: f64,
    cp: f64,
) -> LatticeResult<(f64, usize)> {
    let contract = OptionContract::new(maturity, strike, OptionRight::from_sign(cp)?);
    let market = MarketData::new(spot, rate, dividend_yield, volatility);
    let valuation = price_futures_option(
        &contract,
        &market,
        option_steps,
        futures_steps,
        ExerciseStyle::American,
        &PricingConfig::default(),
    )?;
    Ok((valuation.price, valuation.earliest_exercise_step))
}

/// European futures option price.
///
/// `cp` is `+1` for a call and `-1` for a put; anything else is rejected.
pub fn futures_option_european(
    maturity: f64,
    option_steps: usize,
    futures_steps: usize,
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    strike: f64,
    cp: f64,
) -> LatticeResult<f64> {
    let contract = OptionContract::new(maturity, strike, OptionRight::from_sign(cp)?);
    let market = MarketData::new(spot, rate, dividend_yield, volatility);
    price_futures_option(
        &contract,
        &market,
        option_steps,
        futures_steps,
        ExerciseStyle::European,
        &PricingConfig::default(),
    )
    .map(|v| v.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use binomial_core::ArbitragePolicy;

    #[test]
    fn test_three_step_futures_call() {
        let eu = futures_option_european(1.0, 3, 3, 100.0, 0.05, 0.02, 0.2, 100.0, 1.0).unwrap();
        assert_relative_eq!(eu, 9.85562145046529, epsilon = 1e-8);

        let (am, step) =
            futures_option_american(1.0, 3, 3, 100.0, 0.05, 0.02, 0.2, 100.0, 1.0).unwrap();
        assert_relative_eq!(am, 9.970954412199053, epsilon = 1e-8);
        assert_eq!(step, 2);
    }

    #[test]
    fn test_option_shorter_than_futures() {
        let eu = futures_option_european(1.0, 2, 4, 100.0, 0.05, 0.02, 0.2, 100.0, -1.0).unwrap();
        let (am, step) =
            futures_option_american(1.0, 2, 4, 100.0, 0.05, 0.02, 0.2, 100.0, -1.0).unwrap();

        assert_relative_eq!(eu, 3.913216500690403, epsilon = 1e-8);
        assert_relative_eq!(am, 3.913216500690403, epsilon = 1e-8);
        assert_eq!(step, 2);
    }

    #[test]
    fn test_american_futures_put() {
        let (am, step) =
            futures_option_american(1.0, 10, 15, 100.0, 0.05, 0.0, 0.3, 110.0, -1.0).unwrap();
        assert_relative_eq!(am, 13.015347669641983, epsilon = 1e-8);
        assert_eq!(step, 4);
    }

    #[test]
    fn test_option_periods_exceeding_futures_rejected() {
        let err =
            futures_option_european(1.0, 5, 4, 100.0, 0.05, 0.02, 0.2, 100.0, 1.0).unwrap_err();
        assert!(matches!(err, LatticeError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_futures_periods_rejected() {
        let err =
            futures_option_european(1.0, 0, 0, 100.0, 0.05, 0.02, 0.2, 100.0, 1.0).unwrap_err();
        assert!(
            matches!(err, LatticeError::InvalidInput { ref field, .. } if field == "futures_steps")
        );
    }

    #[test]
    fn test_arbitrage_policy_on_futures_grid() {
        let contract = OptionContract::new(1.0, 100.0, OptionRight::Call);
        let market = MarketData::new(100.0, 0.5, 0.0, 0.05);

        let warned = price_futures_option(
            &contract,
            &market,
            1,
            1,
            ExerciseStyle::European,
            &PricingConfig::default(),
        )
        .unwrap();
        assert!(warned.price.is_finite());

        let ignored = price_futures_option(
            &contract,
            &market,
            1,
            1,
            ExerciseStyle::European,
            &PricingConfig::default().with_arbitrage_policy(ArbitragePolicy::Ignore),
        )
        .unwrap();
        assert_relative_eq!(ignored.price, warned.price);

        let strict = price_futures_option(
            &contract,
            &market,
            1,
            1,
            ExerciseStyle::European,
            &PricingConfig::strict(),
        );
        assert!(matches!(strict, Err(LatticeError::ArbitrageViolation { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let contract = OptionContract::new(1.0, 110.0, OptionRight::Put);
        let market = MarketData::new(100.0, 0.05, 0.0, 0.3);
        let config = PricingConfig::default()
            .with_exercise_tolerance(f64::NAN)
            .with_parallel_threshold(0);

        let err = price_futures_option(
            &contract,
            &market,
            10,
            15,
            ExerciseStyle::American,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, LatticeError::MultipleValidationErrors(ref errs) if errs.len() == 2));
    }
}
