//! # Binomial Core
//!
//! Building blocks for the Binomial option pricing library.
//!
//! This crate provides:
//!
//! - **Parameters**: Cox-Ross-Rubinstein lattice parameters (up/down factors,
//!   risk-neutral probabilities, per-step growth factor)
//! - **Lattices**: Jagged triangular container, spot price trees and the
//!   futures price trees derived from them
//! - **Types**: Option rights, exercise styles, contract and market inputs
//! - **Configuration**: Exercise tolerance, arbitrage policy, batch settings
//!
//! ## Example
//!
//! ```rust
//! use binomial_core::prelude::*;
//!
//! let params = LatticeParams::derive(1.0, 3, 0.2, 0.05, 0.0).unwrap();
//! let tree = PriceLattice::build(100.0, &params).unwrap();
//!
//! assert_eq!(tree.steps(), 3);
//! assert!((tree.node(3, 0) - 100.0 * params.up.powi(3)).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod error;
pub mod lattice;
pub mod params;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{ArbitragePolicy, PricingConfig};
    pub use crate::error::{LatticeError, LatticeResult, Validate, ValidationError};
    pub use crate::lattice::{FuturesLattice, PriceLattice, TriangularLattice};
    pub use crate::params::LatticeParams;
    pub use crate::types::{ExerciseStyle, MarketData, OptionContract, OptionRight, Underlying};
}

pub use config::{ArbitragePolicy, PricingConfig};
pub use error::{LatticeError, LatticeResult, Validate, ValidationError};
pub use lattice::{FuturesLattice, PriceLattice, TriangularLattice};
pub use params::LatticeParams;
pub use types::{ExerciseStyle, MarketData, OptionContract, OptionRight, Underlying};
