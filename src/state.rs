use crate::color::ArtistColors;
use crate::data::aggregate::{self, DEFAULT_TOP_N};
use crate::data::filter::{self, FilterState};
use crate::data::model::{ChartDataset, Metric};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every interaction flows through [`AppState::refilter`] or
/// [`AppState::set_metric`]: the view and everything derived from it are
/// recomputed from scratch, never patched incrementally.
pub struct AppState {
    /// The table, loaded once at startup and never mutated.
    pub dataset: ChartDataset,

    /// Current selections; replaced wholesale on every interaction.
    pub filters: FilterState,

    /// Row indices passing the current filters.
    pub visible: Vec<usize>,

    /// Metric ranking the top chart.
    pub metric: Metric,

    /// Indices of the current top rows, in display order.
    pub top: Vec<usize>,

    /// Artist → bar colour for the top chart.
    pub artist_colors: ArtistColors,
}

impl AppState {
    pub fn new(dataset: ChartDataset) -> Self {
        let mut state = Self {
            visible: (0..dataset.len()).collect(),
            dataset,
            filters: FilterState::default(),
            metric: Metric::Popularity,
            top: Vec::new(),
            artist_colors: ArtistColors::default(),
        };
        state.recompute_top();
        state
    }

    /// Recompute the filtered view and everything derived from it. Also
    /// clears any selection the new upstream choices made unreachable.
    pub fn refilter(&mut self) {
        filter::reconcile(&self.dataset, &mut self.filters);
        self.visible = filter::apply(&self.dataset, &self.filters);
        self.recompute_top();
    }

    /// Switch the top-chart metric and re-rank.
    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
        self.recompute_top();
    }

    fn recompute_top(&mut self) {
        self.top = aggregate::top_by_metric(&self.dataset, &self.visible, self.metric, DEFAULT_TOP_N);
        let colors = ArtistColors::new(
            self.top
                .iter()
                .map(|&i| self.dataset.entries[i].artist.as_str()),
        );
        self.artist_colors = colors;
    }

    /// Page heading: selected country display name and week, "All …" when
    /// unconstrained.
    pub fn heading(&self) -> String {
        let country = match &self.filters.country {
            Some(code) => self
                .dataset
                .country_display_name(code)
                .unwrap_or(code)
                .to_string(),
            None => "All Countries".to_string(),
        };
        let week = self
            .filters
            .week
            .clone()
            .unwrap_or_else(|| "All Weeks".to_string());
        format!("Spotify Top 50 - {country} ({week})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ChartEntry;

    fn entry(country: &str, country_name: &str, week: &str, track: &str) -> ChartEntry {
        ChartEntry {
            country: country.to_string(),
            country_name: country_name.to_string(),
            week: week.to_string(),
            markets: format!("[{country}]"),
            artist: "Artist".to_string(),
            track: track.to_string(),
            ranking: 1.0,
            popularity: 50.0,
            danceability: 0.5,
            energy: 0.5,
            acousticness: 0.5,
            instrumentalness: 0.5,
            positiveness: 0.5,
            liveness: 0.5,
            speechiness: 0.5,
        }
    }

    fn state() -> AppState {
        AppState::new(ChartDataset {
            entries: vec![
                entry("us", "United States", "1", "Alpha"),
                entry("us", "United States", "2", "Bravo"),
                entry("gb", "United Kingdom", "1", "Charlie"),
            ],
            dropped_rows: 0,
        })
    }

    #[test]
    fn refilter_recomputes_the_view() {
        let mut state = state();
        assert_eq!(state.visible.len(), 3);

        state.filters.country = Some("us".into());
        state.refilter();
        assert_eq!(state.visible, vec![0, 1]);

        state.filters = FilterState::default();
        state.refilter();
        assert_eq!(state.visible.len(), 3);
    }

    #[test]
    fn refilter_clears_stale_downstream_selections() {
        let mut state = state();
        state.filters.country = Some("us".into());
        state.filters.track = Some("Alpha".into());
        state.refilter();
        assert_eq!(state.filters.track.as_deref(), Some("Alpha"));

        state.filters.country = Some("gb".into());
        state.refilter();
        assert_eq!(state.filters.track, None);
        assert_eq!(state.visible, vec![2]);
    }

    #[test]
    fn heading_uses_display_names() {
        let mut state = state();
        assert_eq!(state.heading(), "Spotify Top 50 - All Countries (All Weeks)");

        state.filters.country = Some("us".into());
        state.filters.week = Some("2".into());
        state.refilter();
        assert_eq!(state.heading(), "Spotify Top 50 - United States (2)");
    }
}
