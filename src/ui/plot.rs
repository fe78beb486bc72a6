use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, GridInput, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Polygon, Text,
};

use crate::data::aggregate::TrendPoint;
use crate::data::model::Feature;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top songs bar chart
// ---------------------------------------------------------------------------

/// Render the top-songs bar chart, one bar per track, coloured by artist.
pub fn top_chart(ui: &mut Ui, state: &AppState) {
    if state.top.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    let entries = &state.dataset.entries;
    let metric = state.metric;

    // One BarChart per artist so each artist is a single legend entry.
    let mut charts: Vec<BarChart> = Vec::new();
    let mut artists_seen: Vec<&str> = Vec::new();
    for artist in state.top.iter().map(|&i| entries[i].artist.as_str()) {
        if !artists_seen.contains(&artist) {
            artists_seen.push(artist);
        }
    }
    for artist in artists_seen {
        let bars: Vec<Bar> = state
            .top
            .iter()
            .enumerate()
            .filter(|&(_, &i)| entries[i].artist == artist)
            .map(|(pos, &i)| {
                Bar::new(pos as f64, metric.value(&entries[i]))
                    .width(0.7)
                    .name(&entries[i].track)
            })
            .collect();
        charts.push(
            BarChart::new(bars)
                .color(state.artist_colors.color_for(artist))
                .name(artist),
        );
    }

    let labels: Vec<String> = state
        .top
        .iter()
        .map(|&i| shorten(&entries[i].track, 14))
        .collect();
    let n = labels.len();

    let mut plot = Plot::new("top_chart")
        .legend(Legend::default())
        .height(320.0)
        .y_axis_label(metric.label())
        .x_grid_spacer(category_marks(n))
        .x_axis_formatter(move |mark: GridMark, _range: &_| {
            let i = mark.value.round();
            if i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0);

    // A 0-100 score keeps the full axis, whatever the subset's actual range.
    if metric.bounded_percent() {
        plot = plot.include_y(100.0);
    }

    plot.show(ui, |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}

// ---------------------------------------------------------------------------
// Audio features radar chart
// ---------------------------------------------------------------------------

/// Render averaged audio features as a radar polygon with one spoke per
/// feature. Callers handle the empty-view case; `means` is never empty here.
pub fn radar_chart(ui: &mut Ui, id: &str, means: &[(Feature, f64)]) {
    let n = means.len();
    // The axis reaches at least 1.0 so typical 0-1 features keep a stable scale.
    let r_max = means.iter().map(|&(_, v)| v).fold(1.0_f64, f64::max);

    let angle = |k: usize| {
        std::f64::consts::FRAC_PI_2 - (k as f64 / n as f64) * std::f64::consts::TAU
    };
    let point = |k: usize, r: f64| -> [f64; 2] {
        let a = angle(k);
        [r * a.cos(), r * a.sin()]
    };

    let grid = Color32::from_gray(90);

    Plot::new(id.to_string())
        .data_aspect(1.0)
        .height(300.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // Reference rings.
            for frac in [0.25, 0.5, 0.75, 1.0] {
                let ring: PlotPoints = (0..=n).map(|k| point(k % n, r_max * frac)).collect();
                plot_ui.line(Line::new(ring).color(grid).width(0.5));
            }
            // Spokes and axis labels.
            for (k, &(feature, _)) in means.iter().enumerate() {
                let spoke: PlotPoints = vec![[0.0, 0.0], point(k, r_max)].into();
                plot_ui.line(Line::new(spoke).color(grid).width(0.5));
                let [x, y] = point(k, r_max * 1.2);
                plot_ui.text(Text::new(PlotPoint::new(x, y), feature.label()));
            }
            // The averaged feature polygon.
            let outline: PlotPoints = means
                .iter()
                .enumerate()
                .map(|(k, &(_, v))| point(k, v))
                .collect();
            plot_ui.polygon(
                Polygon::new(outline)
                    .stroke(Stroke::new(1.5, Color32::LIGHT_BLUE))
                    .name("Average"),
            );
        });
}

// ---------------------------------------------------------------------------
// Popularity trend line chart
// ---------------------------------------------------------------------------

/// Render a track's popularity over chart weeks.
pub fn trend_chart(ui: &mut Ui, trend: &[TrendPoint]) {
    if trend.is_empty() {
        ui.label("No chart appearances for this selection.");
        return;
    }

    let points: PlotPoints = trend
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.popularity])
        .collect();
    let weeks: Vec<String> = trend.iter().map(|p| p.week.clone()).collect();
    let n = weeks.len();

    Plot::new("trend_chart")
        .height(260.0)
        .x_axis_label("Week")
        .y_axis_label("Popularity")
        .x_grid_spacer(category_marks(n))
        .x_axis_formatter(move |mark: GridMark, _range: &_| {
            let i = mark.value.round();
            if i >= 0.0 && (i as usize) < weeks.len() {
                weeks[i as usize].clone()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(Color32::LIGHT_BLUE).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Grid marks at every category index, for axes labelled by position.
fn category_marks(n: usize) -> impl Fn(GridInput) -> Vec<GridMark> {
    move |_input| {
        (0..n)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }
}

fn shorten(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
