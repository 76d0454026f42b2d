use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::PlotColors;
use crate::report;
use crate::state::Session;

// ---------------------------------------------------------------------------
// Data + fit plot (central panel)
// ---------------------------------------------------------------------------

/// Render the measured points and, when there is one, the fitted line.
pub fn fit_plot(ui: &mut Ui, state: &Session, colors: &PlotColors) {
    let points: PlotPoints = state
        .xs
        .iter()
        .zip(&state.ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| [x, y])
        .collect();

    if points.points().is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Enter (x, y) values in the table or open a file  (File → Open…)");
        });
        return;
    }

    Plot::new("fit_plot")
        .legend(Legend::default())
        .x_axis_label(report::axis_label(&state.x_meta))
        .y_axis_label(report::axis_label(&state.y_meta))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("data")
                    .color(colors.points)
                    .radius(3.5),
            );

            // The line spans whatever x range is visible.
            if let Ok(fit) = state.fit {
                let line = PlotPoints::from_explicit_callback(move |x| fit.predict(x), .., 2);
                plot_ui.line(
                    Line::new(line)
                        .name("fit")
                        .color(colors.fit_line)
                        .width(1.5),
                );
            }
        });
}
