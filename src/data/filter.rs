use std::collections::BTreeSet;

use super::model::{compare_weeks, ChartDataset};

// ---------------------------------------------------------------------------
// Filter state: one optional exact-match selection per cascade stage
// ---------------------------------------------------------------------------

/// The user's current selections. `None` means "All" (no constraint).
///
/// Candidate values for each selector are derived from the table already
/// narrowed by the selectors before it, in the fixed order
/// country → week → artist → track, so the UI can only offer reachable
/// combinations. The final view itself is order-independent: the stages are
/// equality predicates and conjunction commutes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub country: Option<String>,
    pub week: Option<String>,
    pub artist: Option<String>,
    pub track: Option<String>,
}

// ---------------------------------------------------------------------------
// View application
// ---------------------------------------------------------------------------

/// Row indices passing every active selection. Zero matches is a valid
/// result, not an error; a state naming values that never co-occur simply
/// yields an empty view.
pub fn apply(dataset: &ChartDataset, state: &FilterState) -> Vec<usize> {
    matching(
        dataset,
        state.country.as_deref(),
        state.week.as_deref(),
        state.artist.as_deref(),
        state.track.as_deref(),
    )
}

fn matching(
    dataset: &ChartDataset,
    country: Option<&str>,
    week: Option<&str>,
    artist: Option<&str>,
    track: Option<&str>,
) -> Vec<usize> {
    dataset
        .entries
        .iter()
        .enumerate()
        .filter(|(_, e)| country.map_or(true, |c| e.country == c))
        .filter(|(_, e)| week.map_or(true, |w| e.week == w))
        .filter(|(_, e)| artist.map_or(true, |a| e.artist == a))
        .filter(|(_, e)| track.map_or(true, |t| e.track == t))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Cascade candidate lists
// ---------------------------------------------------------------------------

/// Distinct country codes over the full table, sorted.
pub fn country_choices(dataset: &ChartDataset) -> Vec<String> {
    let set: BTreeSet<&str> = dataset.entries.iter().map(|e| e.country.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Distinct weeks reachable under the selected country, in canonical week
/// order.
pub fn week_choices(dataset: &ChartDataset, state: &FilterState) -> Vec<String> {
    let rows = matching(dataset, state.country.as_deref(), None, None, None);
    let set: BTreeSet<&str> = rows.iter().map(|&i| dataset.entries[i].week.as_str()).collect();
    let mut weeks: Vec<String> = set.into_iter().map(str::to_string).collect();
    weeks.sort_by(|a, b| compare_weeks(a, b));
    weeks
}

/// Distinct artists reachable under the selected country and week, sorted.
pub fn artist_choices(dataset: &ChartDataset, state: &FilterState) -> Vec<String> {
    let rows = matching(
        dataset,
        state.country.as_deref(),
        state.week.as_deref(),
        None,
        None,
    );
    let set: BTreeSet<&str> = rows
        .iter()
        .map(|&i| dataset.entries[i].artist.as_str())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Distinct tracks reachable under the selected country, week, and artist,
/// sorted.
pub fn track_choices(dataset: &ChartDataset, state: &FilterState) -> Vec<String> {
    let rows = matching(
        dataset,
        state.country.as_deref(),
        state.week.as_deref(),
        state.artist.as_deref(),
        None,
    );
    let set: BTreeSet<&str> = rows
        .iter()
        .map(|&i| dataset.entries[i].track.as_str())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Drop selections no longer reachable after an upstream change, walking the
/// cascade in order so each stage is checked against candidates derived from
/// the stages before it.
pub fn reconcile(dataset: &ChartDataset, state: &mut FilterState) {
    if state
        .country
        .as_ref()
        .is_some_and(|c| !country_choices(dataset).contains(c))
    {
        state.country = None;
    }
    if state
        .week
        .as_ref()
        .is_some_and(|w| !week_choices(dataset, state).contains(w))
    {
        state.week = None;
    }
    if state
        .artist
        .as_ref()
        .is_some_and(|a| !artist_choices(dataset, state).contains(a))
    {
        state.artist = None;
    }
    if state
        .track
        .as_ref()
        .is_some_and(|t| !track_choices(dataset, state).contains(t))
    {
        state.track = None;
    }
}
