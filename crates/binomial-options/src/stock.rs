//! Options on a spot underlying.
//!
//! The option values are rolled back directly over the spot price lattice.

use binomial_core::{
    ExerciseStyle, LatticeParams, LatticeResult, MarketData, OptionContract, OptionRight,
    PriceLattice, PricingConfig, Validate,
};

use crate::engine::{self, Payoff, Valuation};

/// Prices a stock option over `steps` periods.
///
/// # Example
///
/// ```rust
/// use binomial_core::{ExerciseStyle, MarketData, OptionContract, OptionRight, PricingConfig};
/// use binomial_options::stock::price_stock_option;
///
/// let contract = OptionContract::new(1.0, 100.0, OptionRight::Put);
/// let market = MarketData::new(100.0, 0.05, 0.0, 0.2);
///
/// let american = price_stock_option(
///     &contract, &market, 3, ExerciseStyle::American, &PricingConfig::default(),
/// ).unwrap();
/// assert!((american.price - 6.499559886616257).abs() < 1e-8);
/// assert_eq!(american.earliest_exercise_step, 2);
/// ```
pub fn price_stock_option(
    contract: &OptionContract,
    market: &MarketData,
    steps: usize,
    style: ExerciseStyle,
    config: &PricingConfig,
) -> LatticeResult<Valuation> {
    config.validate_or_error()?;
    contract.ensure_valid()?;
    market.ensure_valid()?;

    let params = LatticeParams::derive(
        contract.maturity,
        steps,
        market.volatility,
        market.rate,
        market.dividend_yield,
    )?;
    params.check_arbitrage(config.arbitrage_policy)?;

    let prices = PriceLattice::build(market.spot, &params)?;
    engine::value(
        prices.nodes(),
        steps,
        &Payoff::from(contract),
        &params,
        style,
        config,
    )
}

/// American stock option: `(price, earliest exercise step)`.
///
/// `cp` is `+1` for a call and `-1` for a put; anything else is rejected.
pub fn stock_option_american(
    maturity: f64,
    steps: usize,
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    strike: f64,
    cp: f64,
) -> LatticeResult<(f64, usize)> {
    let contract = OptionContract::new(maturity, strike, OptionRight::from_sign(cp)?);
    let market = MarketData::new(spot, rate, dividend_yield, volatility);
    let valuation = price_stock_option(
        &contract,
        &market,
        steps,
        ExerciseStyle::American,
        &PricingConfig::default(),
    )?;
    Ok((valuation.price, valuation.earliest_exercise_step))
}

/// European stock option price.
///
/// `cp` is `+1` for a call and `-1` for a put; anything else is rejected.
pub fn stock_option_european(
    maturity: f64,
    steps: usize,
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    strike: f64,
    cp: f64,
) -> LatticeResult<f64> {
    let contract = OptionContract::new(maturity, strike, OptionRight::from_sign(cp)?);
    let market = MarketData::new(spot, rate, dividend_yield, volatility);
    price_stock_option(
        &contract,
        &market,
        steps,
        ExerciseStyle::European,
        &PricingConfig::default(),
    )
    .map(|v| v.price)
}
