//! Backward-induction valuation on a triangular lattice.
//!
//! One routine serves all four option flavours: the underlying lattice
//! (spot or futures prices) and the [`ExerciseRule`] are the only things
//! that vary.

use log::debug;
use serde::{Deserialize, Serialize};

use binomial_core::lattice::ensure_fits;
use binomial_core::{
    ExerciseStyle, LatticeParams, LatticeResult, OptionContract, OptionRight, PricingConfig,
    TriangularLattice,
};

use crate::exercise::{AmericanExercise, EuropeanExercise, ExerciseRecord, ExerciseRule};

/// Strike and right of the option being valued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payoff {
    /// Strike price.
    pub strike: f64,
    /// Call or put.
    pub right: OptionRight,
}

impl Payoff {
    /// Creates a payoff.
    #[must_use]
    pub fn new(strike: f64, right: OptionRight) -> Self {
        Self { strike, right }
    }

    /// Payoff at expiry, floored at zero.
    #[must_use]
    pub fn terminal(&self, underlying: f64) -> f64 {
        self.right.payoff(underlying, self.strike)
    }

    /// Immediate exercise value, not floored.
    #[must_use]
    pub fn exercise(&self, underlying: f64) -> f64 {
        self.right.exercise_value(underlying, self.strike)
    }
}

impl From<&OptionContract> for Payoff {
    fn from(contract: &OptionContract) -> Self {
        Self::new(contract.strike, contract.right)
    }
}

/// Option values at every node together with the exercise record.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionLattice {
    values: TriangularLattice,
    record: ExerciseRecord,
    style: ExerciseStyle,
}

impl OptionLattice {
    /// Present value at the root.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.values.root()
    }

    /// Option value at each node.
    #[must_use]
    pub fn values(&self) -> &TriangularLattice {
        &self.values
    }

    /// Collapses the lattice into its summary.
    #[must_use]
    pub fn into_valuation(self) -> Valuation {
        Valuation {
            price: self.values.root(),
            style: self.style,
            earliest_exercise_step: self.record.earliest_step(),
            exercise_record: self.record,
        }
    }
}

/// Result of a pricing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Present value of the option.
    pub price: f64,
    /// Exercise style the price was computed under.
    pub style: ExerciseStyle,
    /// Earliest step where exercise is at least as good as holding; the
    /// option's step count when that never happens. Always the step count
    /// for European options.
    pub earliest_exercise_step: usize,
    /// Every exercise-consistent step.
    pub exercise_record: ExerciseRecord,
}

/// Rolls option values back from step `steps` of `underlying` to time 0.
///
/// Terminal values are `max(0, sign * (U - K))`. Each interior node gets
/// `(q_up * V_up + q_down * V_down) / R` passed through `rule`. Only nodes
/// with `down <= step` are read; `steps` may be shorter than the underlying
/// lattice.
pub fn backward_induction<R: ExerciseRule + ?Sized>(
    underlying: &TriangularLattice,
    steps: usize,
    payoff: &Payoff,
    params: &LatticeParams,
    rule: &R,
) -> LatticeResult<OptionLattice> {
    ensure_fits(steps, underlying.steps())?;

    let mut values = TriangularLattice::zeros(steps);
    for (j, value) in values.column_mut(steps).iter_mut().enumerate() {
        *value = payoff.terminal(underlying.node(steps, j));
    }

    let mut record = ExerciseRecord::new(steps);
    for i in (0..steps).rev() {
        for j in 0..=i {
            let continuation = (params.prob_up * values.node(i + 1, j)
                + params.prob_down * values.node(i + 1, j + 1))
                / params.growth;
            let decision = rule.decide(continuation, payoff.exercise(underlying.node(i, j)));
            values.set(i, j, decision.value);
            if decision.exercise {
                record.record(i);
            }
        }
    }

    debug!(
        "{:?} {} valued over {} steps: price={:.10}, earliest exercise step={}",
        rule.style(),
        payoff.right,
        steps,
        values.root(),
        record.earliest_step()
    );

    Ok(OptionLattice {
        values,
        record,
        style: rule.style(),
    })
}

/// Values an option under `style`, using the tolerance from `config`.
pub fn value(
    underlying: &TriangularLattice,
    steps: usize,
    payoff: &Payoff,
    params: &LatticeParams,
    style: ExerciseStyle,
    config: &PricingConfig,
) -> LatticeResult<Valuation> {
    let lattice = match style {
        ExerciseStyle::European => {
            backward_induction(underlying, steps, payoff, params, &EuropeanExercise)?
        }
        ExerciseStyle::American => backward_induction(
            underlying,
            steps,
            payoff,
            params,
            &AmericanExercise::new(config.exercise_tolerance),
        )?,
    };
    Ok(lattice.into_valuation())
}
