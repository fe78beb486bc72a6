use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// ChartEntry – one row of the dataset
// ---------------------------------------------------------------------------

/// A single chart entry (one row of the source table).
///
/// Entries are immutable after load; filtering and aggregation work on row
/// indices and never touch the entries themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    /// Market code, e.g. `us`.
    pub country: String,
    /// Market display name, e.g. `United States`.
    pub country_name: String,
    /// Chart week token, normalized to canonical text at load time.
    pub week: String,
    /// Raw markets list, kept as text.
    pub markets: String,
    pub artist: String,
    pub track: String,
    /// Chart position for this country/week. Lower is better.
    pub ranking: f64,
    pub popularity: f64,
    pub danceability: f64,
    pub energy: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub positiveness: f64,
    pub liveness: f64,
    pub speechiness: f64,
}

// ---------------------------------------------------------------------------
// ChartDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full cleaned table, created once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct ChartDataset {
    /// All entries (rows), in file order.
    pub entries: Vec<ChartEntry>,
    /// Rows discarded during load (blank week or unparseable numbers).
    pub dropped_rows: usize,
}

impl ChartDataset {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display name for a market code, from the first matching row.
    pub fn country_display_name(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.country == code)
            .map(|e| e.country_name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Metric – the bar-chart metric choices
// ---------------------------------------------------------------------------

/// Numeric column a user can rank the top chart by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Popularity,
    Danceability,
    Energy,
    Acousticness,
    Instrumentalness,
    Positiveness,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Popularity,
        Metric::Danceability,
        Metric::Energy,
        Metric::Acousticness,
        Metric::Instrumentalness,
        Metric::Positiveness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Popularity => "Popularity",
            Metric::Danceability => "Danceability",
            Metric::Energy => "Energy",
            Metric::Acousticness => "Acousticness",
            Metric::Instrumentalness => "Instrumentalness",
            Metric::Positiveness => "Positiveness",
        }
    }

    pub fn value(self, entry: &ChartEntry) -> f64 {
        match self {
            Metric::Popularity => entry.popularity,
            Metric::Danceability => entry.danceability,
            Metric::Energy => entry.energy,
            Metric::Acousticness => entry.acousticness,
            Metric::Instrumentalness => entry.instrumentalness,
            Metric::Positiveness => entry.positiveness,
        }
    }

    /// True for 0-100 bounded scores. The top chart pins its axis to the
    /// full range for these so a narrow subset cannot stretch the scale.
    pub fn bounded_percent(self) -> bool {
        matches!(self, Metric::Popularity)
    }
}

// ---------------------------------------------------------------------------
// Feature – the radar-chart axes
// ---------------------------------------------------------------------------

/// Audio descriptor averaged for the radar chart, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Danceability,
    Acousticness,
    Energy,
    Instrumentalness,
    Liveness,
    Speechiness,
    Positiveness,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::Danceability,
        Feature::Acousticness,
        Feature::Energy,
        Feature::Instrumentalness,
        Feature::Liveness,
        Feature::Speechiness,
        Feature::Positiveness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Feature::Danceability => "Danceability",
            Feature::Acousticness => "Acousticness",
            Feature::Energy => "Energy",
            Feature::Instrumentalness => "Instrumentalness",
            Feature::Liveness => "Liveness",
            Feature::Speechiness => "Speechiness",
            Feature::Positiveness => "Positiveness",
        }
    }

    pub fn value(self, entry: &ChartEntry) -> f64 {
        match self {
            Feature::Danceability => entry.danceability,
            Feature::Acousticness => entry.acousticness,
            Feature::Energy => entry.energy,
            Feature::Instrumentalness => entry.instrumentalness,
            Feature::Liveness => entry.liveness,
            Feature::Speechiness => entry.speechiness,
            Feature::Positiveness => entry.positiveness,
        }
    }
}

// ---------------------------------------------------------------------------
// Week ordering
// ---------------------------------------------------------------------------

/// Canonical ordering for week tokens.
///
/// Week identifiers are stored as text but usually name a week number, so
/// plain lexical order would put "10" before "2". Two numeric tokens compare
/// numerically, a numeric token sorts before a non-numeric one, and two
/// non-numeric tokens fall back to lexical order. Used for the week dropdown
/// and the trend x-axis.
pub fn compare_weeks(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weeks_sort_numerically() {
        let mut weeks = vec!["2", "10", "1"];
        weeks.sort_by(|a, b| compare_weeks(a, b));
        assert_eq!(weeks, vec!["1", "2", "10"]);
    }

    #[test]
    fn only_popularity_is_a_bounded_score() {
        for metric in Metric::ALL {
            assert_eq!(metric.bounded_percent(), metric == Metric::Popularity);
        }
    }

    #[test]
    fn numeric_weeks_sort_before_text_weeks() {
        let mut weeks = vec!["bonus", "3", "12", "festive"];
        weeks.sort_by(|a, b| compare_weeks(a, b));
        assert_eq!(weeks, vec!["3", "12", "bonus", "festive"]);
    }
}
