//! From-scratch evaluation.
//!
//! Quadratic in the number of placed talks. The director uses it only to
//! seed its cached score and to verify incremental results.

use talkforge_core::{HardSoftScore, Placement, Schedule};

use crate::constraint::{pair_matches, unary_matches, ConstraintKind, ConstraintMatches};

/// Computes the score of a schedule over all unordered pairs of placed talks.
///
/// Unassigned talks take part in no constraint.
pub fn evaluate(schedule: &Schedule) -> HardSoftScore {
    let mut score = HardSoftScore::ZERO;
    for_each_match(schedule, |_, matches| score += matches.impact());
    score
}

/// Match counts per constraint, indexed by `ConstraintKind::index`.
pub fn evaluate_by_constraint(schedule: &Schedule) -> [i64; ConstraintKind::ALL.len()] {
    let mut counts = [0i64; ConstraintKind::ALL.len()];
    for_each_match(schedule, |_, matches| {
        for kind in matches.iter() {
            counts[kind.index()] += 1;
        }
    });
    counts
}

/// Visits every talk and every unordered pair with at least one match.
pub(crate) fn for_each_match<F>(schedule: &Schedule, mut visit: F)
where
    F: FnMut(&[usize], ConstraintMatches),
{
    let problem = schedule.problem();
    let placed: Vec<(usize, Placement)> = schedule
        .assignment()
        .iter()
        .filter_map(|(talk, placement)| placement.map(|p| (talk, p)))
        .collect();

    for (i, &(a, at_a)) in placed.iter().enumerate() {
        let unary = unary_matches(problem, a, at_a);
        if !unary.is_empty() {
            visit(&[a], unary);
        }
        for &(b, at_b) in &placed[i + 1..] {
            let matches = pair_matches(problem, a, at_a, b, at_b);
            if !matches.is_empty() {
                visit(&[a, b], matches);
            }
        }
    }
}

#[cfg(test)]
mod tests;
