use eframe::egui;

use crate::data::Dashboard;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NbaDashboardApp {
    pub state: AppState,
}

impl NbaDashboardApp {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            state: AppState::new(dashboard),
        }
    }
}

impl eframe::App for NbaDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &mut self.state);
        });
    }
}
