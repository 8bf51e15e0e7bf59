//! Closed-form European prices used as lattice references.
//!
//! - [`black_scholes_price`]: Black-Scholes-Merton with a continuous yield
//! - [`black76_price`]: Black (1976) for options on futures
//!
//! A European lattice price converges to these as the number of steps grows.

use statrs::distribution::{ContinuousCDF, Normal};

use binomial_core::{LatticeError, LatticeResult, MarketData, OptionContract, OptionRight};

fn require_volatility(volatility: f64) -> LatticeResult<()> {
    if volatility.is_finite() && volatility > 0.0 {
        Ok(())
    } else {
        Err(LatticeError::invalid_input(
            "volatility",
            format!("closed form requires positive volatility, got {volatility}"),
        ))
    }
}

/// Black-Scholes-Merton price of a European option on a spot asset.
///
/// ```text
/// d1 = (ln(S/K) + (r - c + σ²/2) T) / (σ √T)
/// d2 = d1 - σ √T
/// V  = ω (S e^{-cT} N(ω d1) - K e^{-rT} N(ω d2))
/// ```
///
/// with `ω = +1` for calls and `-1` for puts.
pub fn black_scholes_price(contract: &OptionContract, market: &MarketData) -> LatticeResult<f64> {
    contract.ensure_valid()?;
    market.ensure_valid()?;
    require_volatility(market.volatility)?;

    let forward = market.spot * ((market.rate - market.dividend_yield) * contract.maturity).exp();
    Ok(black76(
        forward,
        contract.strike,
        contract.maturity,
        market.rate,
        market.volatility,
        contract.right,
    ))
}

/// Black-76 price of a European option on a futures price.
///
/// # Arguments
///
/// * `futures_price` - Current futures price
/// * `strike` - Strike price
/// * `expiry` - Option expiry in years
/// * `rate` - Continuously compounded discount rate
/// * `volatility` - Futures price volatility
/// * `right` - Call or put
pub fn black76_price(
    futures_price: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    right: OptionRight,
) -> LatticeResult<f64> {
    OptionContract::new(expiry, strike, right).ensure_valid()?;
    MarketData::new(futures_price, rate, 0.0, volatility).ensure_valid()?;
    require_volatility(volatility)?;
    Ok(black76(futures_price, strike, expiry, rate, volatility, right))
}

fn black76(
    forward: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    right: OptionRight,
) -> f64 {
    let normal = Normal::standard();
    let vol_sqrt_t = volatility * expiry.sqrt();
    let d1 = ((forward / strike).ln() + 0.5 * volatility * volatility * expiry) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    let w = right.sign();
    (-rate * expiry).exp() * w * (forward * normal.cdf(w * d1) - strike * normal.cdf(w * d2))
}
