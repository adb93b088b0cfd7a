use std::path::Path;

use anyhow::{Context, Result};

use super::model::{SurveyDataset, Value};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a survey table from a CSV file.
///
/// Layout: comma-delimited, first row = header, one survey response per row.
/// Cell types are inferred per value: empty → null, integer, float, text.
pub fn load_csv(path: &Path) -> Result<SurveyDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Vec<Value> = record.iter().map(infer_value).collect();
        rows.push(row);
    }

    Ok(SurveyDataset::new(columns, rows))
}

fn infer_value(s: &str) -> Value {
    let s = s.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Text(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_header_and_infers_cell_types() {
        let file = write_temp("Type_SME,FL_Score,Note\n1,3.5,fine\n2,,\n");
        let ds = load_csv(file.path()).unwrap();

        assert_eq!(ds.columns, vec!["Type_SME", "FL_Score", "Note"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0][0], Value::Integer(1));
        assert_eq!(ds.rows[0][1], Value::Float(3.5));
        assert_eq!(ds.rows[0][2], Value::Text("fine".into()));
        assert_eq!(ds.rows[1][1], Value::Null);
        assert_eq!(ds.rows[1][2], Value::Null);
    }

    #[test]
    fn ragged_rows_are_an_error() {
        let file = write_temp("a,b\n1,2,3\n");
        assert!(load_csv(file.path()).is_err());
    }
}
