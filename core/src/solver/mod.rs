//! Minimum-cost vial allocation
//!
//! Covering a dose with fixed vial sizes is the unbounded coin-change
//! problem. With sizes 40/100/120 a largest-vial-first greedy is wrong for
//! some targets (180 mg is cheapest as 100 + 40 + 40, not 120 + 100), so
//! the solver runs a memoized recurrence over remaining milligrams.
//!
//! Each call is a pure function of its inputs; the memo table is local to
//! the call and discarded with it.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::vial::{Drug, VialCombination};

/// Memo keys quantize remaining mg to tenths, so fractional per-kilogram
/// doses (e.g. 3 mg/kg at 60.5 kg) hash stably.
const KEYS_PER_MG: f64 = 10.0;

/// Errors from the allocation solver
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SolveError {
    /// A positive dose with no usable vial size cannot be covered.
    #[error("no stocked vial size can cover {required_mg} mg of {drug}")]
    NoFeasibleCombination { drug: Drug, required_mg: f64 },
}

/// A priced vial combination covering at least the required dose
#[derive(Debug, Clone, PartialEq)]
pub struct VialAllocation {
    /// Total price across all vials, markup included
    pub cost: f64,

    /// The vials dispensed
    pub combination: VialCombination,
}

/// Cheapest combination of vials covering at least `required_mg`.
///
/// `stocked_sizes` restricts Opdivo to the vial sizes physically in stock;
/// Yervoy always uses its single 50 mg vial regardless. `price_multiplier`
/// scales every vial price uniformly (hospital markup), so it scales the
/// result without changing which combination wins.
///
/// Ties on price are broken by the combination using the fewest vials.
/// A zero or negative requirement costs nothing and dispenses nothing.
///
/// # Example
/// ```
/// use regimen_simulator_core_rs::{solve_min_cost, Drug};
///
/// let alloc = solve_min_cost(100.0, Drug::Opdivo, &[40, 100, 120], 1.0).unwrap();
/// assert_eq!(alloc.cost, 58850.0);
/// assert_eq!(alloc.combination.label(), "100mg x 1");
/// ```
///
/// # Errors
/// [`SolveError::NoFeasibleCombination`] when `required_mg` is positive but
/// no allowed size is stocked.
pub fn solve_min_cost(
    required_mg: f64,
    drug: Drug,
    stocked_sizes: &[u32],
    price_multiplier: f64,
) -> Result<VialAllocation, SolveError> {
    if required_mg <= 0.0 {
        return Ok(VialAllocation {
            cost: 0.0,
            combination: VialCombination::empty(),
        });
    }

    let options: Vec<(u32, f64)> = drug
        .allowed_sizes()
        .iter()
        .copied()
        .filter(|size| drug == Drug::Yervoy || stocked_sizes.contains(size))
        .filter_map(|size| drug.base_price(size).map(|p| (size, p * price_multiplier)))
        .collect();

    if options.is_empty() {
        return Err(SolveError::NoFeasibleCombination { drug, required_mg });
    }

    let target = (required_mg * KEYS_PER_MG).round() as i64;
    let mut memo: HashMap<i64, Partial> = HashMap::new();
    let best = cover(target, &options, &mut memo);

    Ok(VialAllocation {
        cost: best.cost,
        combination: VialCombination::from_counts(&best.counts),
    })
}

/// Best-known way to cover some remaining requirement
#[derive(Debug, Clone)]
struct Partial {
    cost: f64,
    vials: u32,
    counts: HashMap<u32, u32>,
}

impl Partial {
    fn satisfied() -> Self {
        Self {
            cost: 0.0,
            vials: 0,
            counts: HashMap::new(),
        }
    }
}

/// Recurrence: append one vial of each option to the best cover of the
/// reduced requirement; overshoot counts as satisfied ("at least" coverage).
///
/// `options` is non-empty, so some candidate always beats the infinite
/// sentinel and the recursion bottoms out within `remaining / min(size)`
/// levels.
fn cover(remaining: i64, options: &[(u32, f64)], memo: &mut HashMap<i64, Partial>) -> Partial {
    if remaining <= 0 {
        return Partial::satisfied();
    }
    if let Some(hit) = memo.get(&remaining) {
        return hit.clone();
    }

    let mut best = Partial {
        cost: f64::INFINITY,
        vials: u32::MAX,
        counts: HashMap::new(),
    };
    for &(size, price) in options {
        let step = i64::from(size) * KEYS_PER_MG as i64;
        let sub = cover(remaining - step, options, memo);
        let cost = price + sub.cost;
        let vials = 1 + sub.vials;
        if cost < best.cost || (cost == best.cost && vials < best.vials) {
            let mut counts = sub.counts.clone();
            *counts.entry(size).or_insert(0) += 1;
            best = Partial { cost, vials, counts };
        }
    }

    memo.insert(remaining, best.clone());
    best
}
