use std::path::Path;

use crate::data::loader;
use crate::data::model::SurveyDataset;
use crate::data::recode;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Everything shown on the page derives from these fields each frame;
/// no chart data is cached between frames.
pub struct AppState {
    /// Recoded dataset (None until a valid file is loaded).
    pub dataset: Option<SurveyDataset>,

    /// Financial metric columns of the current dataset, in file order.
    pub financial_metrics: Vec<String>,

    /// Metric driving the box-plot sections.
    pub selected_metric: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            financial_metrics: Vec::new(),
            selected_metric: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Install a freshly recoded dataset and reset derived selections.
    pub fn set_dataset(&mut self, dataset: SurveyDataset) {
        self.financial_metrics = dataset.financial_metric_columns();
        // Default selection: first metric column in file order.
        self.selected_metric = self.financial_metrics.first().cloned();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load, validate, and recode a CSV file. On any failure the previous
    /// dataset is discarded and the error lands in `status_message`.
    pub fn load_csv(&mut self, path: &Path) {
        let prepared = loader::load_csv(path)
            .map_err(|e| format!("{e:#}"))
            .and_then(|raw| recode::prepare(raw).map_err(|e| e.to_string()));

        match prepared {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} responses with columns {:?}",
                    dataset.len(),
                    dataset.columns
                );
                self.set_dataset(dataset);
            }
            Err(message) => {
                log::error!("Failed to load file: {message}");
                self.dataset = None;
                self.financial_metrics.clear();
                self.selected_metric = None;
                self.status_message = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_csv_recodes_and_selects_default_metric() {
        let file = write_temp(
            "Type_SME,Established_year,Sector,SME_Size,FL_Score,FR_Score\n\
             1,1,1,1,0.5,0.9\n\
             2,2,2,2,0.7,0.8\n",
        );
        let mut state = AppState::default();
        state.load_csv(file.path());

        assert!(state.status_message.is_none());
        let ds = state.dataset.as_ref().unwrap();
        assert_eq!(
            ds.column("SME_Type").unwrap().next().unwrap(),
            &Value::Text("Micro".into())
        );
        assert_eq!(state.financial_metrics, vec!["FL_Score", "FR_Score"]);
        assert_eq!(state.selected_metric.as_deref(), Some("FL_Score"));
    }

    #[test]
    fn missing_columns_produce_error_and_no_dataset() {
        let file = write_temp("Type_SME,Sector,SME_Size\n1,1,1\n");
        let mut state = AppState::default();
        state.load_csv(file.path());

        assert!(state.dataset.is_none());
        assert!(state.selected_metric.is_none());
        let message = state.status_message.unwrap();
        assert!(message.contains("missing required columns"));
        assert!(message.contains("Established_year"));
    }

    #[test]
    fn failed_load_discards_previous_dataset() {
        let good = write_temp("Type_SME,Established_year,Sector,SME_Size\n1,1,1,1\n");
        let bad = write_temp("Sector\n1\n");
        let mut state = AppState::default();
        state.load_csv(good.path());
        assert!(state.dataset.is_some());

        state.load_csv(bad.path());
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
    }
}
