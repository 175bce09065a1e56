use std::collections::BTreeMap;

use eframe::egui::{Color32, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};
use egui_extras::{Column, TableBuilder};

use crate::color::generate_palette;
use crate::data::model::PaperSet;
use crate::state::{AppState, TABLE_ROW_LIMIT};
use crate::stats::Histogram;

// ---------------------------------------------------------------------------
// Central panel – preview table, charts, search
// ---------------------------------------------------------------------------

/// Render the central panel.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a metadata CSV to begin  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            papers_section(ui, state);
            ui.separator();
            charts_section(ui, state);
            ui.separator();
            search_section(ui, state);
        });
}

// ---------------------------------------------------------------------------
// Paper tables
// ---------------------------------------------------------------------------

fn papers_section(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.heading("Papers");
    ui.weak(format!(
        "Showing {} of {} filtered records",
        state.filtered.len().min(TABLE_ROW_LIMIT),
        state.filtered.len()
    ));
    paper_table(ui, dataset, &state.filtered, "papers_table", true);
}

/// A capped, read-only table of records.  `indices` point into the dataset;
/// only the first [`TABLE_ROW_LIMIT`] are shown.
fn paper_table(
    ui: &mut Ui,
    dataset: &PaperSet,
    indices: &[usize],
    id: &str,
    show_authors: bool,
) {
    ui.push_id(id, |ui: &mut Ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder().clip(true))
            .column(Column::auto().at_least(140.0).clip(true));
        if show_authors {
            table = table.column(Column::remainder().clip(true));
        }

        table
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Published");
                });
                header.col(|ui| {
                    ui.strong("Title");
                });
                header.col(|ui| {
                    ui.strong("Journal");
                });
                if show_authors {
                    header.col(|ui| {
                        ui.strong("Authors");
                    });
                }
            })
            .body(|mut body| {
                for &idx in indices.iter().take(TABLE_ROW_LIMIT) {
                    let paper = &dataset.papers[idx];
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(paper.publish_time.to_string());
                        });
                        row.col(|ui| {
                            ui.label(&paper.title);
                        });
                        row.col(|ui| {
                            ui.label(paper.journal_display());
                        });
                        if show_authors {
                            row.col(|ui| {
                                ui.label(paper.authors_display());
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn charts_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Visualizations");

    ui.label("Publications per year (all records)");
    pubs_per_year_plot(ui, &state.pubs_per_year);
    ui.add_space(8.0);

    ui.label("Top journals (all records)");
    top_journals_plot(ui, &state.top_journals);
    ui.add_space(8.0);

    ui.label("Abstract length distribution (filtered set)");
    abstract_hist_plot(ui, &state.abstract_hist);
}

fn pubs_per_year_plot(ui: &mut Ui, pubs: &BTreeMap<i32, u64>) {
    let line_points: PlotPoints = pubs
        .iter()
        .map(|(&year, &count)| [year as f64, count as f64])
        .collect();
    let marker_points: PlotPoints = pubs
        .iter()
        .map(|(&year, &count)| [year as f64, count as f64])
        .collect();

    Plot::new("pubs_per_year_plot")
        .height(220.0)
        .allow_scroll(false)
        .x_axis_label("Year")
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(line_points).color(Color32::LIGHT_BLUE).width(2.0));
            plot_ui.points(
                Points::new(marker_points)
                    .radius(3.5)
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

fn top_journals_plot(ui: &mut Ui, top_journals: &[(String, u64)]) {
    if top_journals.is_empty() {
        ui.weak("No journal information available.");
        return;
    }

    let n = top_journals.len();
    let palette = generate_palette(n);

    // Row 0 (most frequent) drawn at the top.
    let bars: Vec<Bar> = top_journals
        .iter()
        .enumerate()
        .map(|(i, (name, count))| {
            let (r, g, b) = palette[i];
            Bar::new((n - 1 - i) as f64, *count as f64)
                .width(0.7)
                .name(name)
                .fill(Color32::from_rgb(r, g, b))
        })
        .collect();

    let names: Vec<String> = top_journals.iter().map(|(name, _)| name.clone()).collect();
    Plot::new("top_journals_plot")
        .height(340.0)
        .allow_scroll(false)
        .x_axis_label("Count")
        .y_axis_formatter(move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            let i = rounded as usize;
            if i < names.len() {
                names[names.len() - 1 - i].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

fn abstract_hist_plot(ui: &mut Ui, hist: &Histogram) {
    if hist.is_empty() {
        ui.weak("No records match the current filters.");
        return;
    }

    let width = hist.bin_width as f64;
    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(i, &count)| {
            Bar::new((i as f64 + 0.5) * width, count as f64).width(width * 0.95)
        })
        .collect();

    Plot::new("abstract_hist_plot")
        .height(220.0)
        .allow_scroll(false)
        .x_axis_label("Abstract length (words)")
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn search_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Search papers");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Keyword (title or abstract):");
        if ui.text_edit_singleline(&mut state.search).changed() {
            state.update_search();
        }
    });

    let query = state.search.trim();
    if query.is_empty() {
        return;
    }
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.label(format!(
        "Found {} papers containing \"{query}\"",
        state.search_hits.len()
    ));
    if !state.search_hits.is_empty() {
        paper_table(ui, dataset, &state.search_hits, "search_table", false);
    }
}
