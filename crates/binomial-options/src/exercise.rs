//! Early-exercise rules applied at interior lattice nodes.
//!
//! The valuation engine is generic over [`ExerciseRule`]. European options
//! keep the discounted continuation value; American options take the larger
//! of continuation and immediate exercise and report whether the node is
//! exercise-consistent.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use binomial_core::ExerciseStyle;

/// Outcome of applying an exercise rule at one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDecision {
    /// Value assigned to the node.
    pub value: f64,
    /// True if the assigned value equals the exercise value within tolerance.
    pub exercise: bool,
}

/// Decides a node's value from its continuation and exercise values.
pub trait ExerciseRule {
    /// Exercise style this rule implements.
    fn style(&self) -> ExerciseStyle;

    /// Resolves the node value.
    ///
    /// # Arguments
    ///
    /// * `continuation` - Discounted risk-neutral expectation of the children
    /// * `exercise_value` - `sign * (underlying - strike)`, not floored at zero
    fn decide(&self, continuation: f64, exercise_value: f64) -> NodeDecision;
}

/// No early exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuropeanExercise;

impl ExerciseRule for EuropeanExercise {
    fn style(&self) -> ExerciseStyle {
        ExerciseStyle::European
    }

    fn decide(&self, continuation: f64, _exercise_value: f64) -> NodeDecision {
        NodeDecision {
            value: continuation,
            exercise: false,
        }
    }
}

/// Exercise allowed at every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmericanExercise {
    tolerance: f64,
}

impl AmericanExercise {
    /// Creates the rule with an absolute tolerance for exercise-consistency.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for AmericanExercise {
    fn default() -> Self {
        Self::new(1e-10)
    }
}

impl ExerciseRule for AmericanExercise {
    fn style(&self) -> ExerciseStyle {
        ExerciseStyle::American
    }

    fn decide(&self, continuation: f64, exercise_value: f64) -> NodeDecision {
        let value = continuation.max(exercise_value);
        NodeDecision {
            value,
            exercise: (value - exercise_value).abs() < self.tolerance,
        }
    }
}

/// Steps at which some node was exercise-consistent.
///
/// The earliest step is kept as an explicit running minimum, independent of
/// the order in which nodes are visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    horizon: usize,
    earliest: Option<usize>,
    steps: BTreeSet<usize>,
}

impl ExerciseRecord {
    /// Creates an empty record for an option expiring at step `horizon`.
    #[must_use]
    pub fn new(horizon: usize) -> Self {
        Self {
            horizon,
            earliest: None,
            steps: BTreeSet::new(),
        }
    }

    /// Marks `step` as exercise-consistent.
    pub fn record(&mut self, step: usize) {
        self.steps.insert(step);
        self.earliest = Some(self.earliest.map_or(step, |e| e.min(step)));
    }

    /// Earliest exercise-consistent step, or the expiry step if none.
    #[must_use]
    pub fn earliest_step(&self) -> usize {
        self.earliest.unwrap_or(self.horizon)
    }

    /// Expiry step of the option.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// True if no interior node was exercise-consistent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Exercise-consistent steps in ascending order.
    pub fn steps(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps.iter().copied()
    }
}
