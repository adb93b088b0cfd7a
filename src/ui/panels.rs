use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, table};

/// Box-plot sections, in page order: heading, grouping column, palette hue.
const BOX_PLOT_SECTIONS: [(&str, &str, f32); 3] = [
    ("Sector-Specific Financial Profiles", "Sector", 0.0),
    ("Impact of SME Size on Financial Metrics", "SME_Size", 120.0),
    ("Financial Health by SME Type", "SME_Type", 240.0),
];

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: upload button, load status, error text.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("SME Financial Insights Dashboard");

        ui.separator();

        if ui.button("Upload CSV File…").clicked() {
            open_file_dialog(state);
        }

        if let Some(ds) = &state.dataset {
            ui.separator();
            ui.label(format!(
                "{} responses, {} columns",
                ds.len(),
                ds.columns.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Dashboard page (central panel)
// ---------------------------------------------------------------------------

/// Render the full dashboard, top to bottom. Re-runs from scratch every
/// frame; all chart data is derived from `state` on the spot.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        dataset,
        financial_metrics,
        selected_metric,
        ..
    } = state;

    let Some(dataset) = dataset.as_ref() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a CSV file of SME survey data to explore insights.");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Data Overview");
            table::preview_table(ui, dataset);
            ui.separator();

            ui.heading("Distribution of SME Types");
            charts::sme_type_bar_chart(ui, dataset);
            ui.separator();

            if financial_metrics.is_empty() {
                ui.label(
                    RichText::new("No financial metric columns found in the dataset.")
                        .color(ui.visuals().warn_fg_color),
                );
            } else {
                ui.heading("Correlation Between Financial Metrics");
                charts::correlation_heatmap(ui, dataset, financial_metrics);
                ui.separator();

                metric_selector(ui, financial_metrics, selected_metric);

                if let Some(metric) = selected_metric.clone() {
                    for (title, group_column, hue_offset) in BOX_PLOT_SECTIONS {
                        ui.add_space(8.0);
                        ui.heading(title);
                        charts::grouped_box_plot(ui, dataset, group_column, &metric, hue_offset);
                    }
                }
            }

            ui.separator();
            ui.label("Upload your SME financial data to explore insights!");
        });
}

/// Single-selection combo over the financial metric columns.
fn metric_selector(ui: &mut Ui, metrics: &[String], selected: &mut Option<String>) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Select Financial Metric");
        let current = selected.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("metric_select")
            .selected_text(current.clone())
            .show_ui(ui, |ui: &mut Ui| {
                for col in metrics {
                    if ui.selectable_label(current == *col, col).clicked() {
                        *selected = Some(col.clone());
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload SME survey data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_csv(&path);
    }
}
