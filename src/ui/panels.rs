use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, JOURNAL_CHOICE_LIMIT};

// ---------------------------------------------------------------------------
// Left side panel – data source and filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (years, journals) = match &state.dataset {
        Some(dataset) => (
            dataset.years.clone(),
            dataset
                .journals
                .iter()
                .take(JOURNAL_CHOICE_LIMIT)
                .cloned()
                .collect::<Vec<_>>(),
        ),
        None => {
            ui.label("No dataset loaded.");
            ui.weak("Open a metadata CSV via File → Open…");
            return;
        }
    };

    let filter_before = state.filter.clone();

    // ---- Year filter ----
    ui.strong("Year");
    egui::ComboBox::from_id_salt("year_filter")
        .selected_text(
            state
                .filter
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "All years".to_string()),
        )
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut state.filter.year, None, "All years");
            for &year in &years {
                ui.selectable_value(&mut state.filter.year, Some(year), year.to_string());
            }
        });
    ui.add_space(6.0);

    // ---- Journal filter (first 50 unique values; the field is noisy) ----
    ui.strong("Journal");
    egui::ComboBox::from_id_salt("journal_filter")
        .selected_text(
            state
                .filter
                .journal
                .clone()
                .unwrap_or_else(|| "All journals".to_string()),
        )
        .width(200.0)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut state.filter.journal, None, "All journals");
            for journal in &journals {
                ui.selectable_value(
                    &mut state.filter.journal,
                    Some(journal.clone()),
                    journal,
                );
            }
        });

    if state.filter != filter_before {
        state.refilter();
    }

    ui.separator();
    ui.label(format!("Records: {}", state.filtered.len()));
    if state.filter.is_active() && state.filtered.is_empty() {
        ui.weak("No records match the current filters.");
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dataset) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} match filters",
                dataset.len(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::YELLOW
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open metadata CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}
