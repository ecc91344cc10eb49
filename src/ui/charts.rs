use eframe::egui::{Align2, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::ColorMap;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Central panel – two charts side by side
// ---------------------------------------------------------------------------

/// Render the yearly and per-cohort charts in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading("📊 Startups Dashboard");
    ui.label("Welcome to the dashboard displaying data on startups!");
    ui.separator();

    let view = &state.view;
    if state.snapshot.founders.records.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No founder data loaded  (File → Open founders…)");
        });
        return;
    }

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("📈 Startups by Year");
        count_chart(
            &mut cols[0],
            "yearly_chart",
            "Year",
            &view.yearly_counts,
        );

        cols[1].strong("📊 Startups by Cohort (Semester)");
        count_chart(
            &mut cols[1],
            "cohort_chart",
            "Cohort (Semester)",
            &view.cohort_counts,
        );
    });
}

// ---------------------------------------------------------------------------
// Bar chart + count table for one (key, count) series
// ---------------------------------------------------------------------------

fn count_chart<K>(ui: &mut Ui, id: &str, x_label: &str, counts: &[(K, usize)])
where
    K: Ord + Clone + Copy + Into<f64> + std::fmt::Display,
{
    let colors = ColorMap::new(counts.iter().map(|(k, _)| k));

    let bars: Vec<Bar> = counts
        .iter()
        .map(|(key, count)| {
            Bar::new((*key).into(), *count as f64)
                .name(format!("{key}"))
                .fill(colors.color_for(key))
                .width(0.8)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Number of Startups")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            // Count above each bar.
            for (key, count) in counts {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new((*key).into(), *count as f64),
                        RichText::new(count.to_string()).strong(),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });

    ui.add_space(8.0);
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong(x_label);
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Startup Count");
                });
            })
            .body(|mut body| {
                for (key, count) in counts {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(key.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(count.to_string());
                        });
                    });
                }
            });
    });

    if counts.is_empty() {
        ui.label(RichText::new("No rows match the current filters.").italics());
    }
}
