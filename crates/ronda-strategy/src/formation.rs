//! Cross-sectional decile formation of winner and loser cohorts.

use ronda_core::{Date, SecurityId};
use std::collections::HashSet;

/// Number of rank-ordered momentum bins per formation date.
pub const DECILE_COUNT: usize = 10;

/// Minimum number of securities with defined momentum required to attempt
/// a decile split.
pub const MIN_CROSS_SECTION: usize = 10;

/// Winner and loser cohorts selected at one formation date.
///
/// Winners are the securities in the top momentum decile, losers the
/// bottom decile.
#[derive(Debug, Clone)]
pub struct FormationEvent {
    /// The date the cohorts were formed on.
    pub formation_date: Date,
    /// Securities in the top momentum decile.
    pub winners: HashSet<SecurityId>,
    /// Securities in the bottom momentum decile.
    pub losers: HashSet<SecurityId>,
}

/// Form winner/loser cohorts from one date's momentum cross-section.
///
/// `cross_section` holds (security id, momentum) pairs for every security
/// with a defined momentum value at `formation_date`. The cross-section is
/// split into [`DECILE_COUNT`] equal-frequency bins by momentum rank; ties
/// are broken deterministically by sorting on (momentum, security id), so
/// the assignment does not depend on input order.
///
/// Returns `None` — the caller skips the date — when the cross-section has
/// fewer than [`MIN_CROSS_SECTION`] securities, when the decile edges of
/// the sorted momentum values are not strictly increasing (too many
/// repeated values for an equal-frequency split), or when either cohort
/// would come out empty.
#[must_use]
pub fn form_portfolio(
    cross_section: &[(SecurityId, f64)],
    formation_date: Date,
) -> Option<FormationEvent> {
    let deciles = assign_deciles(cross_section)?;

    let winners: HashSet<SecurityId> = deciles
        .iter()
        .filter(|(_, bin)| *bin == DECILE_COUNT - 1)
        .map(|(id, _)| *id)
        .collect();
    let losers: HashSet<SecurityId> = deciles
        .iter()
        .filter(|(_, bin)| *bin == 0)
        .map(|(id, _)| *id)
        .collect();

    if winners.is_empty() || losers.is_empty() {
        return None;
    }

    Some(FormationEvent {
        formation_date,
        winners,
        losers,
    })
}

/// Assign each security of the cross-section to a decile by momentum rank.
///
/// The row at sorted index `i` of `n` goes to bin `i * DECILE_COUNT / n`,
/// which keeps the bin sizes within one of each other.
fn assign_deciles(cross_section: &[(SecurityId, f64)]) -> Option<Vec<(SecurityId, usize)>> {
    let n = cross_section.len();
    if n < MIN_CROSS_SECTION {
        return None;
    }

    let mut sorted: Vec<(SecurityId, f64)> = cross_section.to_vec();
    sorted.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let values: Vec<f64> = sorted.iter().map(|(_, m)| *m).collect();
    if !edges_strictly_increasing(&values) {
        return None;
    }

    Some(
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, (id, _))| (id, i * DECILE_COUNT / n))
            .collect(),
    )
}

/// Check that the interpolated decile edges of a sorted value sequence are
/// strictly increasing.
///
/// Repeated momentum values that straddle a bin boundary collapse two
/// edges onto one another; such a cross-section cannot be partitioned into
/// ten equal-frequency bins and the formation date is skipped.
fn edges_strictly_increasing(sorted: &[f64]) -> bool {
    let n = sorted.len();
    let mut prev = f64::NEG_INFINITY;
    for q in 0..=DECILE_COUNT {
        let pos = q as f64 * (n - 1) as f64 / DECILE_COUNT as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let edge = sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64);
        if q > 0 && edge <= prev {
            return false;
        }
        prev = edge;
    }
    true
}
