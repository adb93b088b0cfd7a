use super::model::{SurveyDataset, Value};

// ---------------------------------------------------------------------------
// Frequency counts
// ---------------------------------------------------------------------------

/// Count each distinct non-null label in a column.
///
/// Returns `(label, count)` pairs sorted by descending count; ties are
/// broken by label so the ordering is deterministic.
pub fn value_counts(dataset: &SurveyDataset, column: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let Some(values) = dataset.column(column) else {
        return counts;
    };
    for value in values {
        let Some(label) = value.as_text() else {
            continue;
        };
        match counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts.sort_by(|(la, na), (lb, nb)| nb.cmp(na).then_with(|| la.cmp(lb)));
    counts
}

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Pairwise-complete Pearson correlation over the financial metric columns.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    /// Metric column names, in file order.
    pub labels: Vec<String>,
    /// Row-major coefficients; `values[i][j]` pairs `labels[i]` with
    /// `labels[j]`. NaN where fewer than two complete pairs exist or a
    /// series is constant.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Compute the matrix for the given metric columns. Rows where either
    /// value is non-numeric are dropped pairwise.
    pub fn compute(dataset: &SurveyDataset, metric_columns: &[String]) -> Self {
        let series: Vec<Vec<Option<f64>>> = metric_columns
            .iter()
            .map(|col| {
                dataset
                    .column(col)
                    .map(|vals| vals.map(Value::as_f64).collect())
                    .unwrap_or_default()
            })
            .collect();

        let n = metric_columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson(&series[i], &series[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        CorrelationMatrix {
            labels: metric_columns.to_vec(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Pearson r over the rows where both series have a numeric value.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        f64::NAN
    } else {
        cov / denom
    }
}

// ---------------------------------------------------------------------------
// Box-plot statistics
// ---------------------------------------------------------------------------

/// Five-number summary plus outliers, using the 1.5×IQR whisker convention.
#[derive(Debug, Clone)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub quartile1: f64,
    pub median: f64,
    pub quartile3: f64,
    pub upper_whisker: f64,
    /// Points beyond the whiskers.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarise a non-empty sample. Returns None for an empty one.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        values.retain(|v| v.is_finite());
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let quartile1 = quantile(&values, 0.25);
        let median = quantile(&values, 0.50);
        let quartile3 = quantile(&values, 0.75);
        let iqr = quartile3 - quartile1;
        let low_fence = quartile1 - 1.5 * iqr;
        let high_fence = quartile3 + 1.5 * iqr;

        // Whiskers sit on the most extreme data points within the fences.
        let lower_whisker = values
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(quartile1);
        let upper_whisker = values
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(quartile3);

        let outliers = values
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(BoxStats {
            lower_whisker,
            quartile1,
            median,
            quartile3,
            upper_whisker,
            outliers,
        })
    }
}

/// Quantile of a sorted sample by linear interpolation.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Box stats of `metric_column` per label of `group_column`.
///
/// Categories keep their first-appearance order in the data; rows with a
/// null group or non-numeric metric are skipped.
pub fn grouped_box_stats(
    dataset: &SurveyDataset,
    group_column: &str,
    metric_column: &str,
) -> Vec<(String, BoxStats)> {
    let (Some(group_idx), Some(metric_idx)) = (
        dataset.column_index(group_column),
        dataset.column_index(metric_column),
    ) else {
        return Vec::new();
    };

    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for row in &dataset.rows {
        let Some(label) = row[group_idx].as_text() else {
            continue;
        };
        let Some(value) = row[metric_idx].as_f64() else {
            continue;
        };
        match groups.iter_mut().find(|(l, _)| l == label) {
            Some((_, vals)) => vals.push(value),
            None => groups.push((label.to_string(), vec![value])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(label, vals)| BoxStats::from_values(vals).map(|s| (label, s)))
        .collect()
}
