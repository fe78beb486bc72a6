use std::collections::{BTreeMap, BTreeSet};

use super::model::{compare_weeks, ChartDataset, Feature, Metric};

/// How many rows the top chart shows by default.
pub const DEFAULT_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Top-N by metric
// ---------------------------------------------------------------------------

/// Indices of the top `n` rows of `view`, ranked by `metric`, one row per
/// (track, artist) pair.
///
/// The same track can appear several times in a view (different weeks or
/// countries); the first occurrence in view order represents the pair. The
/// sort is stable and descending, so ties keep their pre-sort order and the
/// result is deterministic. Fewer than `n` survivors is fine.
pub fn top_by_metric(
    dataset: &ChartDataset,
    view: &[usize],
    metric: Metric,
    n: usize,
) -> Vec<usize> {
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut unique: Vec<usize> = Vec::new();
    for &i in view {
        let e = &dataset.entries[i];
        if seen.insert((e.track.as_str(), e.artist.as_str())) {
            unique.push(i);
        }
    }

    unique.sort_by(|&a, &b| {
        metric
            .value(&dataset.entries[b])
            .total_cmp(&metric.value(&dataset.entries[a]))
    });
    unique.truncate(n);
    unique
}

// ---------------------------------------------------------------------------
// Per-country track summary
// ---------------------------------------------------------------------------

/// One row of the per-country footprint table for a single track.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySummary {
    pub country_name: String,
    /// Distinct weeks the track charted in this country.
    pub weeks_featured: usize,
    /// Lowest ranking reached; lower is better.
    pub best_ranking: f64,
}

/// Where a track charted, across the whole table regardless of the active
/// filters, so its global footprint stays visible under any selection.
/// Sorted by weeks featured, most first; ties keep alphabetical country
/// order.
pub fn track_summary(dataset: &ChartDataset, track: &str) -> Vec<CountrySummary> {
    let mut groups: BTreeMap<&str, (BTreeSet<&str>, f64)> = BTreeMap::new();
    for e in &dataset.entries {
        if e.track != track {
            continue;
        }
        let group = groups
            .entry(e.country_name.as_str())
            .or_insert_with(|| (BTreeSet::new(), f64::INFINITY));
        group.0.insert(e.week.as_str());
        group.1 = group.1.min(e.ranking);
    }

    let mut rows: Vec<CountrySummary> = groups
        .into_iter()
        .map(|(name, (weeks, best))| CountrySummary {
            country_name: name.to_string(),
            weeks_featured: weeks.len(),
            best_ranking: best,
        })
        .collect();
    rows.sort_by(|a, b| b.weeks_featured.cmp(&a.weeks_featured));
    rows
}

// ---------------------------------------------------------------------------
// Feature averages
// ---------------------------------------------------------------------------

/// Mean of every audio feature across the view, in display order.
///
/// `None` for an empty view: an empty selection has no averages, and the
/// explicit outcome keeps NaN out of the radar chart.
pub fn feature_means(dataset: &ChartDataset, view: &[usize]) -> Option<Vec<(Feature, f64)>> {
    if view.is_empty() {
        return None;
    }
    let n = view.len() as f64;
    Some(
        Feature::ALL
            .iter()
            .map(|&feature| {
                let sum: f64 = view.iter().map(|&i| feature.value(&dataset.entries[i])).sum();
                (feature, sum / n)
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Popularity trend
// ---------------------------------------------------------------------------

/// One point of a track's popularity-over-time line.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub week: String,
    pub popularity: f64,
}

/// Popularity per week for one track, over the full table, optionally
/// narrowed to one country. Points sort ascending in canonical week order.
pub fn popularity_trend(
    dataset: &ChartDataset,
    track: &str,
    country: Option<&str>,
) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = dataset
        .entries
        .iter()
        .filter(|e| e.track == track && country.map_or(true, |c| e.country == c))
        .map(|e| TrendPoint {
            week: e.week.clone(),
            popularity: e.popularity,
        })
        .collect();
    points.sort_by(|a, b| compare_weeks(&a.week, &b.week));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ChartEntry;

    fn entry(
        country: &str,
        country_name: &str,
        week: &str,
        artist: &str,
        track: &str,
        ranking: f64,
        popularity: f64,
    ) -> ChartEntry {
        ChartEntry {
            country: country.to_string(),
            country_name: country_name.to_string(),
            week: week.to_string(),
            markets: format!("[{country}]"),
            artist: artist.to_string(),
            track: track.to_string(),
            ranking,
            popularity,
            danceability: popularity / 100.0,
            energy: 0.6,
            acousticness: 0.2,
            instrumentalness: 0.1,
            positiveness: 0.5,
            liveness: 0.3,
            speechiness: 0.05,
        }
    }

    #[test]
    fn top_dedups_track_artist_pairs_and_sorts_descending() {
        let ds = ChartDataset {
            entries: vec![
                entry("us", "United States", "1", "Artist A", "Alpha", 3.0, 80.0),
                entry("us", "United States", "2", "Artist A", "Alpha", 5.0, 75.0),
                entry("us", "United States", "1", "Artist B", "Bravo", 1.0, 95.0),
                entry("us", "United States", "1", "Artist C", "Charlie", 2.0, 60.0),
            ],
            dropped_rows: 0,
        };
        let view: Vec<usize> = (0..ds.len()).collect();

        let top = top_by_metric(&ds, &view, Metric::Popularity, 10);

        // Alpha kept once (its first occurrence), order 95 > 80 > 60.
        assert_eq!(top, vec![2, 0, 3]);
        for &i in &top {
            assert!(view.contains(&i));
        }
    }

    #[test]
    fn top_truncates_to_n() {
        let ds = ChartDataset {
            entries: (0..5)
                .map(|i| {
                    entry(
                        "us",
                        "United States",
                        "1",
                        &format!("Artist {i}"),
                        &format!("Track {i}"),
                        1.0 + i as f64,
                        50.0 + i as f64,
                    )
                })
                .collect(),
            dropped_rows: 0,
        };
        let view: Vec<usize> = (0..ds.len()).collect();

        assert_eq!(top_by_metric(&ds, &view, Metric::Popularity, 3).len(), 3);
        // Fewer rows than n is not an error.
        assert_eq!(top_by_metric(&ds, &view, Metric::Popularity, 10).len(), 5);
    }

    #[test]
    fn top_ties_keep_view_order() {
        let ds = ChartDataset {
            entries: vec![
                entry("us", "United States", "1", "Artist A", "Alpha", 1.0, 70.0),
                entry("us", "United States", "1", "Artist B", "Bravo", 2.0, 70.0),
                entry("us", "United States", "1", "Artist C", "Charlie", 3.0, 70.0),
            ],
            dropped_rows: 0,
        };
        let view: Vec<usize> = (0..ds.len()).collect();

        assert_eq!(top_by_metric(&ds, &view, Metric::Popularity, 10), vec![0, 1, 2]);
    }

    #[test]
    fn summary_counts_weeks_and_best_rank_per_country() {
        // Track "A": us rank 3 in week 1, rank 5 in week 2; gb rank 1 in week 1.
        let ds = ChartDataset {
            entries: vec![
                entry("us", "United States", "1", "Artist A", "A", 3.0, 80.0),
                entry("us", "United States", "2", "Artist A", "A", 5.0, 78.0),
                entry("gb", "United Kingdom", "1", "Artist A", "A", 1.0, 85.0),
                entry("gb", "United Kingdom", "1", "Artist B", "B", 2.0, 60.0),
            ],
            dropped_rows: 0,
        };

        let rows = track_summary(&ds, "A");

        assert_eq!(
            rows,
            vec![
                CountrySummary {
                    country_name: "United States".to_string(),
                    weeks_featured: 2,
                    best_ranking: 3.0,
                },
                CountrySummary {
                    country_name: "United Kingdom".to_string(),
                    weeks_featured: 1,
                    best_ranking: 1.0,
                },
            ]
        );
    }

    #[test]
    fn summary_ignores_active_filters_by_design() {
        // The function takes the full table; there is no view parameter to
        // accidentally narrow it. Counting a track present in two countries
        // always yields both.
        let ds = ChartDataset {
            entries: vec![
                entry("us", "United States", "1", "Artist A", "A", 3.0, 80.0),
                entry("se", "Sweden", "4", "Artist A", "A", 9.0, 70.0),
            ],
            dropped_rows: 0,
        };
        assert_eq!(track_summary(&ds, "A").len(), 2);
    }

    #[test]
    fn feature_means_stay_within_view_bounds() {
        let ds = ChartDataset {
            entries: vec![
                entry("us", "United States", "1", "Artist A", "Alpha", 1.0, 40.0),
                entry("us", "United States", "2", "Artist A", "Alpha", 2.0, 80.0),
            ],
            dropped_rows: 0,
        };
        let view: Vec<usize> = (0..ds.len()).collect();

        let means = feature_means(&ds, &view).expect("non-empty view");
        assert_eq!(means.len(), Feature::ALL.len());
        for (feature, mean) in means {
            let lo = view
                .iter()
                .map(|&i| feature.value(&ds.entries[i]))
                .fold(f64::INFINITY, f64::min);
            let hi = view
                .iter()
                .map(|&i| feature.value(&ds.entries[i]))
                .fold(f64::NEG_INFINITY, f64::max);
            assert!(mean >= lo && mean <= hi, "{feature:?} mean out of bounds");
        }
    }

    #[test]
    fn feature_means_over_empty_view_is_undefined() {
        let ds = ChartDataset::default();
        assert_eq!(feature_means(&ds, &[]), None);
    }

    #[test]
    fn trend_orders_weeks_numerically() {
        let ds = ChartDataset {
            entries: vec![
                entry("us", "United States", "2", "Artist A", "A", 3.0, 70.0),
                entry("us", "United States", "10", "Artist A", "A", 4.0, 65.0),
                entry("us", "United States", "1", "Artist A", "A", 5.0, 75.0),
            ],
            dropped_rows: 0,
        };

        let weeks: Vec<String> = popularity_trend(&ds, "A", None)
            .into_iter()
            .map(|p| p.week)
            .collect();
        assert_eq!(weeks, vec!["1", "2", "10"]);
    }

    #[test]
    fn trend_respects_country_narrowing() {
        let ds = ChartDataset {
            entries: vec![
                entry("us", "United States", "1", "Artist A", "A", 3.0, 70.0),
                entry("gb", "United Kingdom", "1", "Artist A", "A", 1.0, 90.0),
            ],
            dropped_rows: 0,
        };

        let points = popularity_trend(&ds, "A", Some("gb"));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].popularity, 90.0);
    }
}
