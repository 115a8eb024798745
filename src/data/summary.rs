use std::collections::HashMap;

use super::model::{CellValue, Dataset, PlayerRecord};

// ---------------------------------------------------------------------------
// Dataset overview for the home page
// ---------------------------------------------------------------------------

/// First `n` records.
pub fn head(dataset: &Dataset, n: usize) -> &[PlayerRecord] {
    &dataset.players[..n.min(dataset.len())]
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSummary {
    Numeric {
        count: usize,
        mean: f64,
        std: f64,
        min: f64,
        q25: f64,
        median: f64,
        q75: f64,
        max: f64,
    },
    Text {
        count: usize,
        unique: usize,
        top: String,
        freq: usize,
    },
    /// Column with no usable value.
    Empty,
}

impl ColumnSummary {
    /// Row labels of the describe table, in display order.
    pub const STATS: [&'static str; 11] = [
        "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
    ];

    /// Cell for one describe row; blank when it does not apply.
    pub fn stat(&self, name: &str) -> String {
        match self {
            ColumnSummary::Numeric {
                count,
                mean,
                std,
                min,
                q25,
                median,
                q75,
                max,
            } => match name {
                "count" => count.to_string(),
                "mean" => format!("{mean:.3}"),
                "std" => format_std(*std),
                "min" => format!("{min:.3}"),
                "25%" => format!("{q25:.3}"),
                "50%" => format!("{median:.3}"),
                "75%" => format!("{q75:.3}"),
                "max" => format!("{max:.3}"),
                _ => String::new(),
            },
            ColumnSummary::Text {
                count,
                unique,
                top,
                freq,
            } => match name {
                "count" => count.to_string(),
                "unique" => unique.to_string(),
                "top" => top.clone(),
                "freq" => freq.to_string(),
                _ => String::new(),
            },
            ColumnSummary::Empty => match name {
                "count" => "0".to_string(),
                _ => String::new(),
            },
        }
    }
}

fn format_std(std: f64) -> String {
    if std.is_nan() {
        "NaN".to_string()
    } else {
        format!("{std:.3}")
    }
}

/// `describe(include='all')`-style summary, one entry per column in header order.
pub fn describe(dataset: &Dataset) -> Vec<(String, ColumnSummary)> {
    dataset
        .column_names
        .iter()
        .map(|col| {
            let summary = if dataset.is_numeric(col) {
                numeric_summary(dataset.players.iter().filter_map(|p| p.stat(col)).collect())
            } else {
                text_summary(dataset.players.iter().map(|p| p.cell(col)))
            };
            (col.clone(), summary)
        })
        .collect()
}

fn numeric_summary(mut values: Vec<f64>) -> ColumnSummary {
    if values.is_empty() {
        return ColumnSummary::Empty;
    }
    values.sort_by(f64::total_cmp);
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };
    ColumnSummary::Numeric {
        count,
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[count - 1],
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn text_summary<'a>(cells: impl Iterator<Item = &'a CellValue>) -> ColumnSummary {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    let mut count = 0;
    for cell in cells.filter(|c| !c.is_null()) {
        count += 1;
        let key = cell.to_string();
        let n = counts.entry(key.clone()).or_insert(0);
        if *n == 0 {
            first_seen.push(key);
        }
        *n += 1;
    }

    let mut top: Option<(&String, usize)> = None;
    for key in &first_seen {
        let n = counts[key];
        if top.map_or(true, |(_, best)| n > best) {
            top = Some((key, n));
        }
    }

    match top {
        Some((top, freq)) => ColumnSummary::Text {
            count,
            unique: counts.len(),
            top: top.clone(),
            freq,
        },
        None => ColumnSummary::Empty,
    }
}
