//! Filter Engine
//!
//! Pure functions from (dataset, selection) to a [`SummaryTable`].
//! Nothing here holds state: calling twice with the same inputs yields
//! equal tables.

use crate::dataset::{Dataset, Outcome};

use super::types::{
    OutcomeCount, PayloadRange, ScatterPoint, SiteFilter, SiteSuccessCount, SummaryTable,
};

/// Pie chart data for the dropdown selection
///
/// - `All`: one row per site (first-appearance order) with its number of
///   successful missions. Sites without a success still get a row.
/// - `Site(s)`: launch counts per outcome at `s`, "Yes" before "No".
///   Outcomes with no launches are omitted, so an unknown site gives an
///   empty table.
pub fn outcome_distribution(dataset: &Dataset, site: &SiteFilter) -> SummaryTable {
    match site {
        SiteFilter::All => {
            let rows = dataset
                .sites()
                .iter()
                .map(|site| SiteSuccessCount {
                    site: site.clone(),
                    success_count: dataset
                        .records()
                        .iter()
                        .filter(|r| &r.launch_site == site && r.outcome.is_success())
                        .count(),
                })
                .collect();
            SummaryTable::SiteSuccesses(rows)
        }
        SiteFilter::Site(selected) => {
            let (mut successes, mut failures) = (0usize, 0usize);
            for record in dataset.records().iter().filter(|r| &r.launch_site == selected) {
                match record.outcome {
                    Outcome::Success => successes += 1,
                    Outcome::Failure => failures += 1,
                }
            }

            let rows = [(Outcome::Success, successes), (Outcome::Failure, failures)]
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(outcome, count)| OutcomeCount {
                    outcome: outcome.label().to_string(),
                    count,
                })
                .collect();
            SummaryTable::OutcomeCounts(rows)
        }
    }
}

/// Scatter chart data: launches inside `payload` and matching `site`
///
/// Rows keep dataset order. Ranges that exclude every launch give an empty
/// table.
pub fn scatter_subset(dataset: &Dataset, site: &SiteFilter, payload: PayloadRange) -> SummaryTable {
    let points = dataset
        .records()
        .iter()
        .filter(|r| payload.contains(r.payload_mass_kg))
        .filter(|r| site.matches(&r.launch_site))
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            outcome: r.outcome.flag(),
            booster_category: r.booster_category.clone(),
            launch_site: r.launch_site.clone(),
        })
        .collect();
    SummaryTable::ScatterPoints(points)
}
