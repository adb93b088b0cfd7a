use thiserror::Error;

use super::model::{SurveyDataset, Value};

// ---------------------------------------------------------------------------
// Required schema
// ---------------------------------------------------------------------------

/// Columns the uploaded file must contain, under their raw (pre-rename) names.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Type_SME", "Established_year", "Sector", "SME_Size"];

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Uploaded CSV is missing required columns ({0}). Please check the file format.")]
    MissingColumns(String),
}

/// Verify that every required column is present, before any rename.
pub fn validate_required(dataset: &SurveyDataset) -> Result<(), SchemaError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| dataset.column_index(col).is_none())
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns(missing.join(", ")))
    }
}

// ---------------------------------------------------------------------------
// Label mappings (survey codebook)
// ---------------------------------------------------------------------------

pub const ESTABLISHED_YEAR_LABELS: [(i64, &str); 3] = [
    (1, "Within 5 years"),
    (2, "5-10 years"),
    (3, "More than 10 years"),
];

pub const SME_TYPE_LABELS: [(i64, &str); 4] =
    [(1, "Micro"), (2, "Small"), (3, "Medium"), (4, "Large")];

pub const SECTOR_LABELS: [(i64, &str); 5] = [
    (1, "Healthcare"),
    (2, "Technology"),
    (3, "Services"),
    (4, "Agriculture"),
    (5, "Construction"),
];

pub const SME_SIZE_LABELS: [(i64, &str); 5] = [
    (1, "1-9"),
    (2, "10-49"),
    (3, "50-249"),
    (4, "250-999"),
    (5, "1000+"),
];

/// Map one cell through a codebook table.
///
/// Integer codes (and floats with no fractional part, as produced by CSV
/// type inference on "1.0") look up their label; everything else becomes
/// null. In particular, already-labeled text maps to null rather than
/// surviving a second pass.
fn map_code(value: &Value, labels: &[(i64, &str)]) -> Value {
    let code = match value {
        Value::Integer(i) => Some(*i),
        Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        _ => None,
    };
    code.and_then(|c| labels.iter().find(|(k, _)| *k == c))
        .map(|(_, label)| Value::Text(label.to_string()))
        .unwrap_or(Value::Null)
}

/// Replace every cell of `column` using the codebook table, in place.
pub fn recode_column(dataset: &mut SurveyDataset, column: &str, labels: &[(i64, &str)]) {
    if let Some(idx) = dataset.column_index(column) {
        for row in &mut dataset.rows {
            row[idx] = map_code(&row[idx], labels);
        }
    }
}

// ---------------------------------------------------------------------------
// Full preparation pipeline
// ---------------------------------------------------------------------------

/// Validate, rename, and recode an uploaded table.
///
/// Consumes the raw dataset; the returned table has `SME_Type` and
/// `Established_Year` in place of the raw column names, with all four
/// categorical columns holding labels (or nulls for unmapped codes).
pub fn prepare(mut dataset: SurveyDataset) -> Result<SurveyDataset, SchemaError> {
    validate_required(&dataset)?;

    dataset.rename_column("Type_SME", "SME_Type");
    dataset.rename_column("Established_year", "Established_Year");

    recode_column(&mut dataset, "Established_Year", &ESTABLISHED_YEAR_LABELS);
    recode_column(&mut dataset, "SME_Type", &SME_TYPE_LABELS);
    recode_column(&mut dataset, "Sector", &SECTOR_LABELS);
    recode_column(&mut dataset, "SME_Size", &SME_SIZE_LABELS);

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_dataset(rows: Vec<Vec<Value>>) -> SurveyDataset {
        SurveyDataset::new(
            vec![
                "Type_SME".into(),
                "Established_year".into(),
                "Sector".into(),
                "SME_Size".into(),
            ],
            rows,
        )
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let ds = SurveyDataset::new(
            vec!["Type_SME".into(), "Sector".into(), "SME_Size".into()],
            Vec::new(),
        );
        let err = prepare(ds).unwrap_err();
        assert!(err.to_string().contains("Established_year"));
    }

    #[test]
    fn prepare_renames_and_recodes() {
        let ds = raw_dataset(vec![
            vec![
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3),
                Value::Integer(4),
            ],
            vec![
                Value::Integer(4),
                Value::Integer(3),
                Value::Integer(5),
                Value::Integer(1),
            ],
        ]);
        let ds = prepare(ds).unwrap();

        assert_eq!(
            ds.columns,
            vec!["SME_Type", "Established_Year", "Sector", "SME_Size"]
        );
        assert_eq!(ds.rows[0][0], Value::Text("Micro".into()));
        assert_eq!(ds.rows[0][1], Value::Text("5-10 years".into()));
        assert_eq!(ds.rows[0][2], Value::Text("Services".into()));
        assert_eq!(ds.rows[0][3], Value::Text("250-999".into()));
        assert_eq!(ds.rows[1][2], Value::Text("Construction".into()));
    }

    #[test]
    fn unmapped_codes_become_null() {
        let ds = raw_dataset(vec![vec![
            Value::Integer(99),
            Value::Integer(0),
            Value::Null,
            Value::Float(2.5),
        ]]);
        let ds = prepare(ds).unwrap();
        assert!(ds.rows[0].iter().all(|v| v.is_null()));
    }

    #[test]
    fn whole_floats_look_up_like_integers() {
        let ds = raw_dataset(vec![vec![
            Value::Float(1.0),
            Value::Float(3.0),
            Value::Float(2.0),
            Value::Float(5.0),
        ]]);
        let ds = prepare(ds).unwrap();
        assert_eq!(ds.rows[0][0], Value::Text("Micro".into()));
        assert_eq!(ds.rows[0][1], Value::Text("More than 10 years".into()));
        assert_eq!(ds.rows[0][2], Value::Text("Technology".into()));
        assert_eq!(ds.rows[0][3], Value::Text("1000+".into()));
    }

    #[test]
    fn recode_does_not_double_apply() {
        // Re-running the mapping over already-labeled text nulls the cells
        // instead of crashing; the codebook keys are integers only.
        let mut ds = raw_dataset(vec![vec![
            Value::Integer(2),
            Value::Integer(1),
            Value::Integer(1),
            Value::Integer(1),
        ]]);
        ds.rename_column("Type_SME", "SME_Type");
        recode_column(&mut ds, "SME_Type", &SME_TYPE_LABELS);
        assert_eq!(ds.rows[0][0], Value::Text("Small".into()));

        recode_column(&mut ds, "SME_Type", &SME_TYPE_LABELS);
        assert_eq!(ds.rows[0][0], Value::Null);
    }

    #[test]
    fn recoded_columns_only_contain_known_labels_or_null() {
        let ds = raw_dataset(vec![
            vec![
                Value::Integer(1),
                Value::Integer(7),
                Value::Integer(2),
                Value::Integer(3),
            ],
            vec![
                Value::Text("bogus".into()),
                Value::Integer(1),
                Value::Integer(9),
                Value::Null,
            ],
        ]);
        let ds = prepare(ds).unwrap();

        let labels: Vec<&str> = SME_TYPE_LABELS.iter().map(|(_, l)| *l).collect();
        for value in ds.column("SME_Type").unwrap() {
            match value {
                Value::Text(s) => assert!(labels.contains(&s.as_str())),
                Value::Null => {}
                other => panic!("unexpected value after recode: {other:?}"),
            }
        }
    }
}
