use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::SurveyDataset;

/// How many rows the "Data Overview" section previews.
pub const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Preview table
// ---------------------------------------------------------------------------

/// Render the first rows of the recoded dataset as a striped table.
pub fn preview_table(ui: &mut Ui, dataset: &SurveyDataset) {
    let n_rows = dataset.len().min(PREVIEW_ROWS);

    ScrollArea::horizontal()
        .id_salt("preview_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(70.0), dataset.columns.len())
                .header(20.0, |mut header| {
                    for col in &dataset.columns {
                        header.col(|ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|mut body| {
                    for row in dataset.rows.iter().take(n_rows) {
                        body.row(18.0, |mut table_row| {
                            for cell in row {
                                table_row.col(|ui| {
                                    ui.label(cell.to_string());
                                });
                            }
                        });
                    }
                });
        });
}
