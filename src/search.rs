//! Adaptive byte-budget search.
//!
//! The relationship between image width and rendered byte size is monotonic
//! but not analytically invertible: quantization and run-length compression
//! interact nonlinearly with resolution. So the search doubles the width
//! until it first overshoots the budget (cheap when starting far from the
//! target), then refines with a halving step, bounded by wall clock rather
//! than iteration count because each trial's cost (resize + quantize +
//! encode + render) varies with width.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::{DitherError, Result, SEARCH_WIDTH_LIMIT};

/// How one trial's output compares to the byte budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetFit {
    /// Output is under budget; usable, but a larger width might still fit.
    Under,
    /// Output exceeds the budget.
    Over,
    /// Output is exactly the budget, an immediate win.
    Exact,
}

impl BudgetFit {
    /// Classify an output byte length against a budget.
    pub fn classify(len: usize, budget: usize) -> Self {
        match len.cmp(&budget) {
            std::cmp::Ordering::Less => BudgetFit::Under,
            std::cmp::Ordering::Greater => BudgetFit::Over,
            std::cmp::Ordering::Equal => BudgetFit::Exact,
        }
    }
}

/// The result of evaluating one candidate width.
#[derive(Clone, Debug)]
pub struct Trial {
    pub output: String,
    pub fit: BudgetFit,
}

/// Search state threaded through the loop; kept explicit so the termination
/// conditions stay auditable and testable apart from the render pipeline.
struct SearchState {
    width: usize,
    /// Undefined until the first overshoot; its presence switches the
    /// search from the doubling phase to binary refinement.
    step: Option<usize>,
    seen: HashSet<usize>,
    best: Option<String>,
}

/// Find the largest width whose rendered output fits within the budget.
///
/// Repeatedly evaluates `task` at candidate widths, starting from
/// `start_width`. An `Exact` trial returns immediately. Otherwise the search
/// runs until the soft `timeout` elapses (checked at iteration boundaries
/// only, so one slow trial may overrun it) or until a width would repeat
/// during refinement, then returns the best under-budget output seen.
/// Later under-budget trials always replace earlier ones, since they sit at
/// larger widths. `Ok(None)` means no trial ever came in under budget.
///
/// A task error aborts the search; there is no per-trial retry.
pub fn fit_to_budget<F>(start_width: usize, timeout: Duration, mut task: F) -> Result<Option<String>>
where
    F: FnMut(usize) -> Result<Trial>,
{
    if start_width == 0 {
        return Err(DitherError::ParameterOutOfRange {
            name: "start_width",
            value: 0,
            min: 1,
            max: SEARCH_WIDTH_LIMIT,
        });
    }

    let start = Instant::now();
    let mut state = SearchState {
        width: start_width.min(SEARCH_WIDTH_LIMIT),
        step: None,
        seen: HashSet::new(),
        best: None,
    };

    while start.elapsed() < timeout {
        // Cycle guard: once a step size exists, revisiting a width means no
        // further progress is possible.
        if state.step.is_some() && state.seen.contains(&state.width) {
            tracing::debug!(width = state.width, "width already tried, stopping");
            break;
        }

        let trial = task(state.width)?;
        if state.step.is_some() {
            state.seen.insert(state.width);
        }
        tracing::debug!(
            width = state.width,
            bytes = trial.output.len(),
            fit = ?trial.fit,
            step = ?state.step,
        );

        match trial.fit {
            BudgetFit::Exact => return Ok(Some(trial.output)),
            BudgetFit::Over => {
                let step = match state.step {
                    // First overshoot: establish the step and start refining.
                    None => state.width.div_ceil(4),
                    Some(step) => step.div_ceil(2),
                };
                state.step = Some(step);
                state.width = state.width.saturating_sub(step).max(1);
            }
            BudgetFit::Under => {
                state.best = Some(trial.output);
                match state.step {
                    // Still bracketing: double until something overshoots.
                    None => state.width = (state.width * 2).min(SEARCH_WIDTH_LIMIT),
                    Some(step) => {
                        state.width += step;
                        state.step = Some(step.div_ceil(2));
                    }
                }
            }
        }
    }

    Ok(state.best)
}
