use std::path::Path;

use eframe::egui;

use crate::data::DEFAULT_CSV;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CordExplorerApp {
    pub state: AppState,
}

impl Default for CordExplorerApp {
    fn default() -> Self {
        let mut state = AppState::default();

        // Load the default file when it sits in the working directory;
        // otherwise the central panel shows an open-a-file prompt.
        let default_path = Path::new(DEFAULT_CSV);
        if default_path.exists() {
            state.load_file(default_path);
        } else {
            log::info!("No {DEFAULT_CSV} in the working directory; waiting for File → Open.");
        }

        Self { state }
    }
}

impl eframe::App for CordExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::central_panel(ui, &mut self.state);
        });
    }
}
