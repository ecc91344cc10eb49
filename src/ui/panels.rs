use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔎 Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the closures.
    let view = state.view.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(options) = &view.faculty_options {
                if let Some(choice) =
                    selector(ui, "faculty", "Select Faculty", options, &view.selection.faculty)
                {
                    state.set_faculty(&choice);
                }
            }

            if let Some(options) = &view.startup_options {
                if let Some(choice) = selector(
                    ui,
                    "startup_name",
                    "Select Startup",
                    options,
                    &view.selection.startup_name,
                ) {
                    state.set_startup_name(&choice);
                }
            }

            if let Some(options) = &view.industry_options {
                if let Some(choice) = selector(
                    ui,
                    "industry",
                    "Select Startup Type (Industry)",
                    options,
                    &view.selection.industry,
                ) {
                    state.set_industry(&choice);
                }
            }

            ui.separator();
            year_range(ui, state);
        });
}

/// A labelled combo box. Returns the newly picked value, if any.
fn selector(ui: &mut Ui, id: &str, label: &str, options: &[String], current: &str) -> Option<String> {
    let mut picked = None;
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui.selectable_label(option == current, option).clicked() && option != current {
                    picked = Some(option.clone());
                }
            }
        });
    ui.add_space(6.0);
    picked
}

fn year_range(ui: &mut Ui, state: &mut AppState) {
    let (Some((min, max)), Some((mut lo, mut hi))) =
        (state.view.year_bounds, state.view.selection.year_range)
    else {
        return;
    };

    ui.strong("Select Year Range");
    let from = ui.add(egui::Slider::new(&mut lo, min..=max).text("From"));
    let to = ui.add(egui::Slider::new(&mut hi, min..=max).text("To"));
    if from.changed() || to.changed() {
        // Dragging one handle past the other moves both.
        if from.changed() && lo > hi {
            hi = lo;
        }
        if to.changed() && hi < lo {
            lo = hi;
        }
        state.set_year_range(lo, hi);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open founders…").clicked() {
                if let Some(path) = pick_table("Open founders data") {
                    state.open_founders(&path);
                }
                ui.close_menu();
            }
            if ui.button("Open startups…").clicked() {
                if let Some(path) = pick_table("Open startups data") {
                    state.open_startups(&path);
                }
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        let founders = &state.snapshot.founders;
        ui.label(format!(
            "{} founders loaded ({} dropped), {} visible",
            founders.records.len(),
            founders.dropped,
            state.view.visible_founders
        ));

        ui.separator();

        ui.label(format!(
            "{} startups loaded, {} visible",
            state.snapshot.startups.records.len(),
            state.view.visible_startups
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn pick_table(title: &str) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}
