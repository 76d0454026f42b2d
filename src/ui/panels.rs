use std::path::PathBuf;

use eframe::egui::{self, Align, Color32, RichText, TextEdit, Ui};

use crate::data::model::{Axis, MetaField};
use crate::report;
use crate::state::Session;

// ---------------------------------------------------------------------------
// Left side panel – axis metadata, fit result, data grid
// ---------------------------------------------------------------------------

/// Render the left editor panel.
pub fn side_panel(ui: &mut Ui, state: &mut Session) {
    ui.heading("Axes");
    ui.separator();
    axis_editor(ui, state);

    ui.add_space(8.0);
    ui.heading("Fit");
    ui.separator();
    fit_summary(ui, state);

    ui.add_space(8.0);
    ui.heading("Data");
    ui.separator();
    data_table(ui, state);
}

fn axis_editor(ui: &mut Ui, state: &mut Session) {
    egui::Grid::new("axis_meta")
        .num_columns(4)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            ui.strong("Name");
            ui.strong("Symbol");
            ui.strong("Unit");
            ui.end_row();

            for axis in Axis::ALL {
                ui.strong(axis.to_string());
                for field in MetaField::ALL {
                    let mut text = state.meta(axis).field(field).to_string();
                    let width = if field == MetaField::Name { 110.0 } else { 50.0 };
                    let response = ui.add(TextEdit::singleline(&mut text).desired_width(width));
                    if response.changed() {
                        // An invalid symbol keystroke is simply not applied.
                        if let Err(e) = state.on_axis_meta_changed(axis, field, &text) {
                            log::debug!("{e}");
                        }
                    }
                }
                ui.end_row();
            }
        });
}

fn fit_summary(ui: &mut Ui, state: &Session) {
    let decimals = state.settings.decimals;
    let (slope, intercept) = match &state.fit {
        Ok(fit) => (
            report::slope_text(fit, &state.x_meta, &state.y_meta, decimals),
            report::intercept_text(fit, &state.y_meta, decimals),
        ),
        Err(_) => (String::new(), String::new()),
    };

    egui::Grid::new("fit_result")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Slope");
            ui.monospace(slope);
            ui.end_row();
            ui.label("Intercept");
            ui.monospace(intercept);
            ui.end_row();
        });

    match &state.fit {
        Ok(fit) => {
            ui.weak(format!("n = {}, r = {:.4}", fit.n, fit.r));
        }
        Err(reason) => {
            ui.weak(format!("No fit: {reason}"));
        }
    }
}

/// Whether a cell edit should be applied: the result must look like (the
/// start of) a number, or the user is deleting characters.
pub fn accept_cell_edit(old: &str, new: &str) -> bool {
    new.len() < old.len() || is_numeric_input(new)
}

/// Empty text, a complete decimal number, or one still being typed
/// (`-`, `1.`, `.5e`, `2e-`). Only sign, digits, one dot and an exponent are
/// accepted, so `inf` and `NaN` are not.
pub fn is_numeric_input(text: &str) -> bool {
    let t = text.trim();
    let mut chars = t.chars().peekable();
    if matches!(chars.peek(), Some('+' | '-')) {
        chars.next();
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&c) = chars.peek() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        chars.next();
    }
    match chars.next() {
        None => true,
        Some('e' | 'E') if seen_digit => {
            if matches!(chars.peek(), Some('+' | '-')) {
                chars.next();
            }
            chars.all(|c| c.is_ascii_digit())
        }
        Some(_) => false,
    }
}

/// What the user did to the data grid during one frame.
#[derive(Debug, Default)]
pub struct GridActions {
    pub edits: Vec<(usize, Axis, String)>,
    pub insert_before: Option<usize>,
    pub delete: Option<usize>,
}

/// Apply one frame's grid actions. Cell edits carry the row indices the grid
/// was drawn with, so they are applied before any insert or delete shifts
/// the rows; a structural change then only runs if no edit touched the
/// table shape.
pub fn apply_grid_actions(state: &mut Session, actions: GridActions) {
    let len_before = state.table.len();
    for (row, axis, text) in actions.edits {
        if let Err(e) = state.on_cell_edited(row, axis, &text) {
            log::warn!("Dropped cell edit: {e}");
        }
    }
    if state.table.len() != len_before {
        if actions.insert_before.is_some() || actions.delete.is_some() {
            log::debug!("Row action skipped: rows moved in the same frame");
        }
        return;
    }

    if let Some(before) = actions.insert_before {
        state.insert_row(before);
    }
    if let Some(row) = actions.delete {
        if let Err(e) = state.delete_row(row) {
            log::warn!("Could not delete row: {e}");
        }
    }
}

fn data_table(ui: &mut Ui, state: &mut Session) {
    use egui_extras::{Column, TableBuilder};

    let mut edits: Vec<(usize, Axis, String)> = Vec::new();
    let mut insert_before: Option<usize> = None;
    let mut delete: Option<usize> = None;

    let row_height = ui.spacing().interact_size.y + 4.0;
    let headers = [state.x_meta.symbol.clone(), state.y_meta.symbol.clone()];
    let table = &state.table;

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(36.0))
        .columns(Column::remainder().at_least(60.0), 2)
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            for h in &headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, table.len(), |mut row| {
                let i = row.index();

                row.col(|ui: &mut Ui| {
                    let label = if table.is_entry_row(i) {
                        "*".to_string()
                    } else {
                        (i + 1).to_string()
                    };
                    let response = ui.add(
                        egui::Label::new(RichText::new(label).weak()).sense(egui::Sense::click()),
                    );
                    response.context_menu(|ui: &mut Ui| {
                        if ui.button("Insert Row").clicked() {
                            insert_before = Some(i);
                            ui.close_menu();
                        }
                        if !table.is_entry_row(i) && ui.button("Delete Row").clicked() {
                            delete = Some(i);
                            ui.close_menu();
                        }
                    });
                });

                for axis in Axis::ALL {
                    row.col(|ui: &mut Ui| {
                        let old = table.cell(i, axis).unwrap_or_default();
                        let mut text = old.to_string();
                        let response = ui.add(
                            TextEdit::singleline(&mut text)
                                .id(egui::Id::new(("cell", i, axis)))
                                .horizontal_align(Align::RIGHT)
                                .desired_width(f32::INFINITY),
                        );
                        if response.changed() && accept_cell_edit(old, &text) {
                            edits.push((i, axis, text));
                        }
                        response.context_menu(|ui: &mut Ui| {
                            if ui.button("Insert Row").clicked() {
                                insert_before = Some(i);
                                ui.close_menu();
                            }
                        });
                    });
                }
            });
        });

    apply_grid_actions(
        state,
        GridActions {
            edits,
            insert_before,
            delete,
        },
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut Session) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save").clicked() {
                match state.current_path.clone() {
                    Some(path) => save_to(state, path),
                    None => save_file_dialog(state),
                }
                ui.close_menu();
            }
            if ui.button("Save As…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        let valid = state
            .xs
            .iter()
            .zip(&state.ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .count();
        ui.label(format!(
            "{} rows, {valid} valid points",
            state.table.data_rows().len()
        ));

        if let Some(path) = &state.current_path {
            ui.separator();
            ui.weak(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn dialog(state: &Session, title: &str) -> rfd::FileDialog {
    let mut dialog = rfd::FileDialog::new()
        .set_title(title)
        .add_filter("CSV", &["csv"]);
    if let Some(dir) = &state.settings.last_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog
}

pub fn open_file_dialog(state: &mut Session) {
    if let Some(path) = dialog(state, "Open data").pick_file() {
        open_from(state, path);
    }
}

pub fn open_from(state: &mut Session, path: PathBuf) {
    match state.open_path(&path) {
        Ok(()) => remember(state, &path),
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn save_file_dialog(state: &mut Session) {
    if let Some(path) = dialog(state, "Save data")
        .set_file_name("data.csv")
        .save_file()
    {
        save_to(state, path);
    }
}

fn save_to(state: &mut Session, path: PathBuf) {
    match state.save_path(&path) {
        Ok(()) => remember(state, &path),
        Err(e) => {
            log::error!("Failed to save file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn remember(state: &mut Session, path: &std::path::Path) {
    state.settings.remember_file(path);
    if let Err(e) = state.settings.save() {
        log::warn!("Could not store settings: {e:#}");
    }
}
