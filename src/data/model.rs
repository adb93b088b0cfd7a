use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of the survey table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common CSV-inferred dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Null => write!(f, ""),
        }
    }
}

impl Value {
    /// Try to interpret the value as an `f64` for statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The recoded label, if this cell holds one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete parsed survey table
// ---------------------------------------------------------------------------

/// Column-name substrings that mark a column as a financial metric.
pub const FINANCIAL_PREFIXES: [&str; 6] = ["FL", "FR", "RA", "MDA", "FDM", "FA"];

/// The full parsed table: named columns in file order, row-major cells.
#[derive(Debug, Clone)]
pub struct SurveyDataset {
    /// Column names in the order they appear in the file.
    pub columns: Vec<String>,
    /// Rows of cells; every row has `columns.len()` entries.
    pub rows: Vec<Vec<Value>>,
}

impl SurveyDataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        SurveyDataset { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Rename a column in place. No-op if `from` is absent.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(idx) = self.column_index(from) {
            self.columns[idx] = to.to_string();
        }
    }

    /// Columns whose name contains any financial-metric substring,
    /// in file order.
    pub fn financial_metric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|col| FINANCIAL_PREFIXES.iter().any(|p| col.contains(p)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str]) -> SurveyDataset {
        SurveyDataset::new(columns.iter().map(|c| c.to_string()).collect(), Vec::new())
    }

    #[test]
    fn metric_detection_is_substring_based_and_file_ordered() {
        let ds = dataset(&["Sector", "FL_Ratio", "Notes", "Total_FA", "MDA1", "SME_Size"]);
        assert_eq!(
            ds.financial_metric_columns(),
            vec!["FL_Ratio", "Total_FA", "MDA1"]
        );
    }

    #[test]
    fn no_metric_columns_yields_empty_set() {
        let ds = dataset(&["Sector", "SME_Size", "Notes"]);
        assert!(ds.financial_metric_columns().is_empty());
    }

    #[test]
    fn rename_keeps_column_position() {
        let mut ds = dataset(&["Type_SME", "Sector"]);
        ds.rename_column("Type_SME", "SME_Type");
        assert_eq!(ds.column_index("SME_Type"), Some(0));
        assert_eq!(ds.column_index("Type_SME"), None);
    }
}
