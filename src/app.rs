use eframe::egui;

use crate::color::PlotColors;
use crate::settings::Settings;
use crate::state::Session;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SimplePlotApp {
    pub state: Session,
    colors: PlotColors,
}

impl SimplePlotApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: Session::new(settings),
            colors: PlotColors::default(),
        }
    }
}

impl eframe::App for SimplePlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: axes, fit, data ----
        egui::SidePanel::left("editor_panel")
            .default_width(340.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::fit_plot(ui, &self.state, &self.colors);
        });
    }
}
