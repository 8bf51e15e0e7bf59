//! Request-based pricing and batch evaluation.
//!
//! Every request owns its lattices, so a batch is embarrassingly parallel.
//! With the `parallel` feature enabled and a batch at or above
//! `PricingConfig::parallel_threshold`, requests are spread over rayon's
//! thread pool; results keep the input order either way.

use log::debug;
use serde::{Deserialize, Serialize};

use binomial_core::{
    ExerciseStyle, LatticeResult, MarketData, OptionContract, PricingConfig, Underlying, Validate,
};

use crate::engine::Valuation;
use crate::futures::price_futures_option;
use crate::stock::price_stock_option;

/// A single option to price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Option terms.
    pub contract: OptionContract,
    /// Market inputs.
    pub market: MarketData,
    /// Spot or futures underlying.
    pub underlying: Underlying,
    /// European or American.
    pub style: ExerciseStyle,
    /// Number of option periods.
    pub steps: usize,
}

impl PricingRequest {
    /// Request for an option on the spot asset.
    #[must_use]
    pub fn stock(
        contract: OptionContract,
        market: MarketData,
        style: ExerciseStyle,
        steps: usize,
    ) -> Self {
        Self {
            contract,
            market,
            underlying: Underlying::Stock,
            style,
            steps,
        }
    }

    /// Request for an option on a futures contract maturing after
    /// `futures_steps` periods.
    #[must_use]
    pub fn futures(
        contract: OptionContract,
        market: MarketData,
        style: ExerciseStyle,
        steps: usize,
        futures_steps: usize,
    ) -> Self {
        Self {
            contract,
            market,
            underlying: Underlying::Futures {
                steps: futures_steps,
            },
            style,
            steps,
        }
    }
}

/// Binomial lattice pricer.
///
/// # Example
///
/// ```rust
/// use binomial_core::{ExerciseStyle, MarketData, OptionContract, OptionRight};
/// use binomial_options::{BinomialPricer, PricingRequest};
///
/// let pricer = BinomialPricer::default();
/// let request = PricingRequest::stock(
///     OptionContract::new(1.0, 100.0, OptionRight::Call),
///     MarketData::new(100.0, 0.05, 0.0, 0.2),
///     ExerciseStyle::European,
///     3,
/// );
///
/// let valuation = pricer.price(&request).unwrap();
/// assert!((valuation.price - 11.043871091951113).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinomialPricer {
    config: PricingConfig,
}

impl BinomialPricer {
    /// Creates a pricer after validating `config`.
    pub fn new(config: PricingConfig) -> LatticeResult<Self> {
        config.validate_or_error()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Prices one request.
    pub fn price(&self, request: &PricingRequest) -> LatticeResult<Valuation> {
        match request.underlying {
            Underlying::Stock => price_stock_option(
                &request.contract,
                &request.market,
                request.steps,
                request.style,
                &self.config,
            ),
            Underlying::Futures { steps } => price_futures_option(
                &request.contract,
                &request.market,
                request.steps,
                steps,
                request.style,
                &self.config,
            ),
        }
    }

    /// Prices every request; a failure affects only its own slot.
    pub fn price_batch(&self, requests: &[PricingRequest]) -> Vec<LatticeResult<Valuation>> {
        let parallel = self.runs_parallel(requests.len());
        debug!(
            "pricing batch of {} requests (parallel={})",
            requests.len(),
            parallel
        );

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            if parallel {
                return requests.par_iter().map(|r| self.price(r)).collect();
            }
        }

        requests.iter().map(|r| self.price(r)).collect()
    }

    fn runs_parallel(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.config.should_parallelize(count)
    }
}
