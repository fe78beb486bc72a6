use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{self, CountrySummary};
use crate::data::filter;
use crate::data::model::{Feature, Metric};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – cascading filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel. The four selectors cascade: each candidate list
/// comes from the table narrowed by the selectors above it.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Spotify Top 50 Explorer");
    ui.separator();

    let countries = filter::country_choices(&state.dataset);
    let weeks = filter::week_choices(&state.dataset, &state.filters);
    let artists = filter::artist_choices(&state.dataset, &state.filters);
    let tracks = filter::track_choices(&state.dataset, &state.filters);

    let mut changed = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= cascade_combo(ui, "country", "Country", &countries, &mut state.filters.country);
            changed |= cascade_combo(ui, "week", "Week", &weeks, &mut state.filters.week);
            changed |= cascade_combo(ui, "artist", "Artist", &artists, &mut state.filters.artist);
            changed |= cascade_combo(ui, "track", "Track", &tracks, &mut state.filters.track);

            ui.separator();
            ui.label(format!(
                "{} of {} rows match",
                state.visible.len(),
                state.dataset.len()
            ));
        });

    if changed {
        state.refilter();
    }
}

/// One "All" + candidates dropdown. Returns true when the selection changed.
fn cascade_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    choices: &[String],
    selection: &mut Option<String>,
) -> bool {
    let mut changed = false;

    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width().min(210.0))
        .selected_text(selection.clone().unwrap_or_else(|| "All".to_string()))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selection.is_none(), "All").clicked() {
                *selection = None;
                changed = true;
            }
            for choice in choices {
                if ui
                    .selectable_label(selection.as_deref() == Some(choice.as_str()), choice)
                    .clicked()
                {
                    *selection = Some(choice.clone());
                    changed = true;
                }
            }
        });
    ui.add_space(6.0);

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar: page heading plus row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(state.heading());
        ui.separator();
        ui.label(format!(
            "{} entries loaded, {} visible",
            state.dataset.len(),
            state.visible.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Central panel – charts and tables, recomputed top-to-bottom every frame
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            top_songs_section(ui, state);
            ui.separator();

            if let Some(track) = state.filters.track.clone() {
                track_detail_section(ui, state, &track);
            } else {
                averages_section(ui, state);
            }

            ui.separator();
            raw_data_section(ui, state);
        });
}

fn top_songs_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Top 10 Songs");

    let mut metric = state.metric;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Metric");
        egui::ComboBox::from_id_salt("metric")
            .selected_text(metric.label())
            .show_ui(ui, |ui: &mut Ui| {
                for m in Metric::ALL {
                    if ui.selectable_label(metric == m, m.label()).clicked() {
                        metric = m;
                    }
                }
            });
    });
    if metric != state.metric {
        state.set_metric(metric);
    }

    super::plot::top_chart(ui, state);
}

fn track_detail_section(ui: &mut Ui, state: &AppState, track: &str) {
    ui.heading(format!("Selected Song - {track}"));

    // Search link on the external service; artist from the track's first row.
    if let Some(entry) = state.dataset.entries.iter().find(|e| e.track == track) {
        let query = urlencoding::encode(&format!("{} {}", entry.track, entry.artist)).into_owned();
        ui.hyperlink_to(
            "Listen on Spotify",
            format!("https://open.spotify.com/search/{query}"),
        );
    }

    ui.add_space(8.0);
    ui.strong("Song stats across countries");
    summary_table(ui, &aggregate::track_summary(&state.dataset, track));

    // Radar over every row of this track, all countries and weeks.
    let rows: Vec<usize> = (0..state.dataset.len())
        .filter(|&i| state.dataset.entries[i].track == track)
        .collect();

    ui.add_space(8.0);
    ui.heading("Audio Features");
    match aggregate::feature_means(&state.dataset, &rows) {
        Some(means) => {
            super::plot::radar_chart(ui, "track_radar", &means);
            ui.label(feature_caption(&means));
        }
        None => {
            ui.label("No data for this track.");
        }
    }

    ui.add_space(8.0);
    ui.heading("Popularity Trend Over Time");
    let trend =
        aggregate::popularity_trend(&state.dataset, track, state.filters.country.as_deref());
    super::plot::trend_chart(ui, &trend);
}

fn averages_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Music Details (Averages)");
    ui.label("Average audio features for the selected filters.");

    match aggregate::feature_means(&state.dataset, &state.visible) {
        Some(means) => {
            super::plot::radar_chart(ui, "avg_radar", &means);
            ui.label(feature_caption(&means));
        }
        None => {
            ui.label("No data for the current filters.");
        }
    }
}

fn feature_caption(means: &[(Feature, f64)]) -> String {
    means
        .iter()
        .map(|(feature, value)| format!("{} = {:.3}", feature.label(), value))
        .collect::<Vec<_>>()
        .join("  |  ")
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn summary_table(ui: &mut Ui, rows: &[CountrySummary]) {
    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(100.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Country");
                });
                header.col(|ui| {
                    ui.strong("Weeks Featured");
                });
                header.col(|ui| {
                    ui.strong("Best Ranking");
                });
            })
            .body(|mut body| {
                for row in rows {
                    body.row(18.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(&row.country_name);
                        });
                        table_row.col(|ui| {
                            ui.label(row.weeks_featured.to_string());
                        });
                        table_row.col(|ui| {
                            ui.label(format!("{:.0}", row.best_ranking));
                        });
                    });
                }
            });
    });
}

/// Collapsible, virtualized view of the filtered rows.
fn raw_data_section(ui: &mut Ui, state: &AppState) {
    egui::CollapsingHeader::new("Raw data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let columns = [
                "Country", "Country Name", "Week", "Markets", "Artist", "Track", "Ranking",
                "Popularity", "Dance", "Energy", "Acoustic", "Instrumental", "Positive",
                "Live", "Speech",
            ];

            ui.push_id("raw_table", |ui: &mut Ui| {
                let mut table = TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(true)
                    .min_scrolled_height(120.0)
                    .max_scroll_height(360.0);
                for _ in &columns {
                    table = table.column(Column::auto().at_least(64.0));
                }

                table
                    .header(20.0, |mut header| {
                        for name in columns {
                            header.col(|ui| {
                                ui.strong(name);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(18.0, state.visible.len(), |mut table_row| {
                            let e = &state.dataset.entries[state.visible[table_row.index()]];
                            let cells = [
                                e.country.clone(),
                                e.country_name.clone(),
                                e.week.clone(),
                                e.markets.clone(),
                                e.artist.clone(),
                                e.track.clone(),
                                format!("{:.0}", e.ranking),
                                format!("{:.0}", e.popularity),
                                format!("{:.3}", e.danceability),
                                format!("{:.3}", e.energy),
                                format!("{:.3}", e.acousticness),
                                format!("{:.3}", e.instrumentalness),
                                format!("{:.3}", e.positiveness),
                                format!("{:.3}", e.liveness),
                                format!("{:.3}", e.speechiness),
                            ];
                            for cell in cells {
                                table_row.col(|ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    });
            });
        });
}
