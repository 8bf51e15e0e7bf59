//! # Binomial Options
//!
//! American and European option pricing on Cox-Ross-Rubinstein lattices.
//!
//! This crate provides:
//!
//! - **Engine**: One backward-induction routine, generic over the exercise rule
//! - **Stock options**: Valued directly over the spot price lattice
//! - **Futures options**: Valued over a futures lattice rolled back from spot
//! - **References**: Black-Scholes-Merton and Black-76 closed forms
//! - **Batch pricing**: Independent requests, optionally in parallel
//!
//! ## Example
//!
//! ```rust
//! use binomial_options::prelude::*;
//!
//! // T = 1y, 50 steps, S = 100, r = 5%, no yield, σ = 20%, K = 100, put
//! let (american, step) =
//!     stock_option_american(1.0, 50, 100.0, 0.05, 0.0, 0.2, 100.0, -1.0).unwrap();
//! let european = stock_option_european(1.0, 50, 100.0, 0.05, 0.0, 0.2, 100.0, -1.0).unwrap();
//!
//! assert!(american > european);
//! assert!(step < 50);
//! ```
//!
//! ## Earliest exercise step
//!
//! For American options the engine records every step containing a node whose
//! value equals its exercise value (within `PricingConfig::exercise_tolerance`)
//! and reports the smallest such step. When no node qualifies the option's step
//! count is reported, which is the European-equivalent case.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod black;
pub mod engine;
pub mod exercise;
pub mod futures;
pub mod pricer;
pub mod stock;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use binomial_core::prelude::*;

    pub use crate::black::{black76_price, black_scholes_price};
    pub use crate::engine::{backward_induction, OptionLattice, Payoff, Valuation};
    pub use crate::exercise::{AmericanExercise, EuropeanExercise, ExerciseRecord, ExerciseRule};
    pub use crate::futures::{
        futures_option_american, futures_option_european, price_futures_option,
    };
    pub use crate::pricer::{BinomialPricer, PricingRequest};
    pub use crate::stock::{price_stock_option, stock_option_american, stock_option_european};
}

pub use engine::{OptionLattice, Payoff, Valuation};
pub use exercise::{AmericanExercise, EuropeanExercise, ExerciseRecord, ExerciseRule};
pub use futures::{futures_option_american, futures_option_european};
pub use pricer::{BinomialPricer, PricingRequest};
pub use stock::{stock_option_american, stock_option_european};
