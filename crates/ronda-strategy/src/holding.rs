//! Long-short return aggregation over overlapping holding windows.
//!
//! Each formation event contributes one winner-minus-loser return per
//! month of its holding window. Because a new cohort is formed every
//! month, up to K vintages overlap on any given calendar month; the
//! per-month strategy return is their average.

use crate::formation::form_portfolio;
use ronda_core::{Date, Panel, Result, RondaError, SecurityId};
use ronda_momentum::MOMENTUM_COLUMN;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// The average long-short return observed in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    /// The holding month.
    pub holding_date: Date,
    /// Mean winner-minus-loser return across the vintages active in this
    /// month.
    pub mean_return: f64,
    /// Number of overlapping formation events that contributed.
    pub n_vintages: usize,
}

/// One security's observation within a single month's cross-section.
struct CrossRow {
    id: SecurityId,
    ret: f64,
    momentum: Option<f64>,
}

/// Run the formation/holding loop over the full date range of a panel.
///
/// `panel` must already carry the momentum column produced with a
/// `formation_window`-month window. Formation dates run from index
/// `formation_window` of the distinct-date sequence through the last index
/// that still leaves a full `holding_window` months of forward returns.
/// Dates whose cross-section cannot be split into deciles are skipped
/// silently.
///
/// For each formation event and each offset `k` in `[0, K)`, the
/// equal-weighted mean return of the winner and loser cohorts is taken
/// over the members observed at the holding month; a long-short return is
/// recorded only when both cohorts have at least one observed member.
/// Overlapping vintages landing on the same holding month are averaged
/// into one [`MonthlyAggregate`].
///
/// # Errors
///
/// Returns [`RondaError::NoUsableReturns`] when the whole run produces no
/// long-short return at all (for instance when `J + K` exceeds the number
/// of distinct months), so callers never summarize an empty series.
pub fn aggregate_strategy(
    panel: &Panel,
    formation_window: usize,
    holding_window: usize,
) -> Result<Vec<MonthlyAggregate>> {
    if formation_window == 0 || holding_window == 0 {
        return Err(RondaError::InvalidData(
            "formation and holding windows must be at least 1".to_string(),
        ));
    }

    let by_date = index_by_date(panel)?;
    let dates: Vec<Date> = by_date.keys().copied().collect();

    let mut buckets: BTreeMap<Date, Vec<f64>> = BTreeMap::new();

    if dates.len() >= formation_window + holding_window {
        let last_formation = dates.len() - holding_window;
        for i in formation_window..=last_formation {
            let formation_date = dates[i];
            let cross_section: Vec<(SecurityId, f64)> = by_date[&formation_date]
                .iter()
                .filter_map(|row| row.momentum.map(|m| (row.id, m)))
                .collect();

            let Some(event) = form_portfolio(&cross_section, formation_date) else {
                continue;
            };

            for offset in 0..holding_window {
                let holding_date = dates[i + offset];
                let rows = &by_date[&holding_date];

                let winner_avg = cohort_mean(rows, &event.winners);
                let loser_avg = cohort_mean(rows, &event.losers);

                if let (Some(winner), Some(loser)) = (winner_avg, loser_avg) {
                    buckets.entry(holding_date).or_default().push(winner - loser);
                }
            }
        }
    }

    if buckets.is_empty() {
        return Err(RondaError::NoUsableReturns);
    }

    Ok(buckets
        .into_iter()
        .map(|(holding_date, returns)| MonthlyAggregate {
            holding_date,
            mean_return: returns.iter().sum::<f64>() / returns.len() as f64,
            n_vintages: returns.len(),
        })
        .collect())
}

/// Group the panel's rows by observation date.
///
/// The ordered map doubles as the sorted distinct-date sequence.
fn index_by_date(panel: &Panel) -> Result<BTreeMap<Date, Vec<CrossRow>>> {
    for col in ["permno", "date", "ret", MOMENTUM_COLUMN] {
        if !panel.has_column(col) {
            return Err(RondaError::MissingColumn(col.to_string()));
        }
    }

    let df = panel.data();
    let dates = panel.row_dates()?;

    let id_col = df.column("permno")?;
    let ret_col = df.column("ret")?;
    if id_col.null_count() > 0 || ret_col.null_count() > 0 {
        return Err(RondaError::InvalidData(
            "null value in permno or ret column".to_string(),
        ));
    }

    let ids: Vec<SecurityId> = id_col
        .as_materialized_series()
        .i64()?
        .into_iter()
        .flatten()
        .collect();
    let rets: Vec<f64> = ret_col
        .as_materialized_series()
        .f64()?
        .into_iter()
        .flatten()
        .collect();
    let momentum: Vec<Option<f64>> = df
        .column(MOMENTUM_COLUMN)?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .collect();

    let mut by_date: BTreeMap<Date, Vec<CrossRow>> = BTreeMap::new();
    for i in 0..dates.len() {
        by_date.entry(dates[i]).or_default().push(CrossRow {
            id: ids[i],
            ret: rets[i],
            momentum: momentum[i],
        });
    }
    Ok(by_date)
}

/// Equal-weighted mean return of the cohort members observed in a month.
///
/// `None` when no member of the cohort has an observation in the month.
fn cohort_mean(rows: &[CrossRow], members: &HashSet<SecurityId>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in rows {
        if members.contains(&row.id) {
            sum += row.ret;
            count += 1;
        }
    }
    if count > 0 { Some(sum / count as f64) } else { None }
}
