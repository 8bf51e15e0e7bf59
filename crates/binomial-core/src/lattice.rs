//! Recombining triangular lattices.
//!
//! Nodes are addressed by `(step, down)` where `step` is the time index and
//! `down` the number of down moves taken so far. Step `i` holds exactly
//! `i + 1` nodes, so positions with `down > step` are not representable.
//!
//! ```text
//!   step:   0        1        2
//!                           (2,0)  S u²
//!                  (1,0)
//!         (0,0)             (2,1)  S
//!                  (1,1)
//!                           (2,2)  S d²
//! ```

use log::debug;

use crate::error::{require_positive, LatticeError, LatticeResult};
use crate::params::LatticeParams;

/// A jagged triangular grid of values.
///
/// `columns[i][j]` is the value after `i` steps with `j` down moves.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularLattice {
    columns: Vec<Vec<f64>>,
}

impl TriangularLattice {
    /// Creates a zero-filled lattice with `steps` periods (`steps + 1` columns).
    #[must_use]
    pub fn zeros(steps: usize) -> Self {
        let columns = (0..=steps).map(|i| vec![0.0; i + 1]).collect();
        Self { columns }
    }

    /// Number of periods.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.columns.len() - 1
    }

    /// Total number of nodes, `(steps + 1)(steps + 2) / 2`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Returns the node value, or `None` outside the triangle.
    #[must_use]
    pub fn get(&self, step: usize, down: usize) -> Option<f64> {
        self.columns.get(step).and_then(|col| col.get(down)).copied()
    }

    /// Returns the node value.
    ///
    /// # Panics
    ///
    /// Panics if `step > steps()` or `down > step`.
    #[must_use]
    pub fn node(&self, step: usize, down: usize) -> f64 {
        self.columns[step][down]
    }

    /// Sets the node value.
    ///
    /// # Panics
    ///
    /// Panics if `step > steps()` or `down > step`.
    pub fn set(&mut self, step: usize, down: usize, value: f64) {
        self.columns[step][down] = value;
    }

    /// All nodes at `step`, ordered by number of down moves.
    ///
    /// # Panics
    ///
    /// Panics if `step > steps()`.
    #[must_use]
    pub fn column(&self, step: usize) -> &[f64] {
        &self.columns[step]
    }

    /// Mutable view of the nodes at `step`.
    ///
    /// # Panics
    ///
    /// Panics if `step > steps()`.
    pub fn column_mut(&mut self, step: usize) -> &mut [f64] {
        &mut self.columns[step]
    }

    /// Root node value.
    #[must_use]
    pub fn root(&self) -> f64 {
        self.columns[0][0]
    }

    /// Iterates over the columns from step 0 to maturity.
    pub fn columns(&self) -> impl Iterator<Item = &[f64]> {
        self.columns.iter().map(Vec::as_slice)
    }
}

/// Spot price tree of the underlying.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLattice {
    params: LatticeParams,
    nodes: TriangularLattice,
}

impl PriceLattice {
    /// Expands `spot` forward over `params.steps` periods.
    ///
    /// Node `(i, j)` holds `spot * u^(i - j) * d^j`. The top node of each
    /// column extends the pure up path and every other node is the down
    /// move from its upper-left parent.
    pub fn build(spot: f64, params: &LatticeParams) -> LatticeResult<Self> {
        require_positive("spot", spot)?;
        let steps = params.steps;
        let mut nodes = TriangularLattice::zeros(steps);
        nodes.set(0, 0, spot);

        for i in 1..=steps {
            let top = nodes.node(i - 1, 0) * params.up;
            nodes.set(i, 0, top);
            for j in 1..=i {
                let value = nodes.node(i - 1, j - 1) * params.down;
                nodes.set(i, j, value);
            }
        }

        debug!("built price lattice: spot={}, steps={}", spot, steps);
        Ok(Self {
            params: *params,
            nodes,
        })
    }

    /// Parameters the tree was built with.
    #[must_use]
    pub fn params(&self) -> &LatticeParams {
        &self.params
    }

    /// Number of periods.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.nodes.steps()
    }

    /// Price at `(step, down)`.
    ///
    /// # Panics
    ///
    /// Panics outside the triangle.
    #[must_use]
    pub fn node(&self, step: usize, down: usize) -> f64 {
        self.nodes.node(step, down)
    }

    /// Underlying node storage.
    #[must_use]
    pub fn nodes(&self) -> &TriangularLattice {
        &self.nodes
    }
}

/// Futures price tree derived from a spot tree.
///
/// At the futures' maturity the futures price equals spot. Earlier nodes hold
/// the undiscounted risk-neutral expectation of the next step, since a
/// futures price is a martingale under the risk-neutral measure.
#[derive(Debug, Clone, PartialEq)]
pub struct FuturesLattice {
    nodes: TriangularLattice,
}

impl FuturesLattice {
    /// Rolls the terminal column of `prices` back to time 0.
    pub fn from_prices(prices: &PriceLattice) -> Self {
        let params = *prices.params();
        let steps = prices.steps();
        let mut nodes = TriangularLattice::zeros(steps);
        nodes
            .column_mut(steps)
            .copy_from_slice(prices.nodes().column(steps));

        for i in (0..steps).rev() {
            for j in 0..=i {
                let value =
                    params.prob_up * nodes.node(i + 1, j) + params.prob_down * nodes.node(i + 1, j + 1);
                nodes.set(i, j, value);
            }
        }

        debug!(
            "built futures lattice: steps={}, initial futures price={:.6}",
            steps,
            nodes.root()
        );
        Self { nodes }
    }

    /// Builds the spot tree for `params` and derives the futures tree from it.
    pub fn build(spot: f64, params: &LatticeParams) -> LatticeResult<Self> {
        let prices = PriceLattice::build(spot, params)?;
        Ok(Self::from_prices(&prices))
    }

    /// Number of periods until the futures contract matures.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.nodes.steps()
    }

    /// Futures price at `(step, down)`.
    ///
    /// # Panics
    ///
    /// Panics outside the triangle.
    #[must_use]
    pub fn node(&self, step: usize, down: usize) -> f64 {
        self.nodes.node(step, down)
    }

    /// Futures price observed today.
    #[must_use]
    pub fn initial_price(&self) -> f64 {
        self.nodes.root()
    }

    /// Underlying node storage.
    #[must_use]
    pub fn nodes(&self) -> &TriangularLattice {
        &self.nodes
    }
}

/// Ensures an option of `option_steps` periods fits on a lattice of
/// `lattice_steps` periods.
pub fn ensure_fits(option_steps: usize, lattice_steps: usize) -> LatticeResult<()> {
    if option_steps == 0 {
        return Err(LatticeError::invalid_input("steps", "must be at least 1"));
    }
    if option_steps > lattice_steps {
        return Err(LatticeError::invalid_input(
            "steps",
            format!(
                "option periods {option_steps} exceed the {lattice_steps} periods of the underlying lattice"
            ),
        ));
    }
    Ok(())
}
