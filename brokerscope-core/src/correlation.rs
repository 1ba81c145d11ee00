//! Correlation summary over the fixed signal column set.
//!
//! Rows where every signal is missing are dropped first. Each cell is then a
//! Pearson coefficient over the rows where *both* columns are present
//! (pairwise-complete observations).

use serde::{Deserialize, Serialize};

use crate::domain::SignalColumn;
use crate::filter::View;

pub const TITLE: &str = "Indicator correlation";

/// Square, symmetric correlation matrix labelled by column on both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<SignalColumn>,
    /// `values[i][j]` correlates `columns[i]` with `columns[j]`. `None` when
    /// fewer than two complete pairs exist or either side has no variance.
    pub values: Vec<Vec<Option<f64>>>,
    /// Rows that survived the all-missing drop.
    pub rows: usize,
}

impl CorrelationMatrix {
    pub fn get(&self, a: SignalColumn, b: SignalColumn) -> Option<f64> {
        let i = self.columns.iter().position(|&c| c == a)?;
        let j = self.columns.iter().position(|&c| c == b)?;
        self.values[i][j]
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.label()).collect()
    }
}

/// The heatmap payload: matrix plus the fixed colour range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub title: String,
    pub value_min: f64,
    pub value_max: f64,
    pub matrix: CorrelationMatrix,
}

impl Heatmap {
    pub fn new(matrix: CorrelationMatrix) -> Self {
        Self {
            title: TITLE.to_string(),
            value_min: -1.0,
            value_max: 1.0,
            matrix,
        }
    }
}

/// Correlate every pair of [`SignalColumn::ALL`] over `view`.
///
/// Returns `None` when no row carries any signal value.
pub fn correlation_matrix(view: &View<'_>) -> Option<CorrelationMatrix> {
    correlate(view, &SignalColumn::ALL)
}

/// Correlate an arbitrary column subset over `view`.
pub fn correlate(view: &View<'_>, columns: &[SignalColumn]) -> Option<CorrelationMatrix> {
    let table: Vec<Vec<Option<f64>>> = view
        .iter()
        .map(|obs| columns.iter().map(|&c| obs.signal(c)).collect::<Vec<_>>())
        .filter(|row| row.iter().any(Option::is_some))
        .collect();

    if table.is_empty() {
        return None;
    }

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = table.iter().any(|row| row[i].is_some()).then_some(1.0);
        for j in (i + 1)..n {
            let r = pearson(table.iter().filter_map(|row| Some((row[i]?, row[j]?))));
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Some(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
        rows: table.len(),
    })
}

/// Pearson correlation of paired samples.
fn pearson(pairs: impl Iterator<Item = (f64, f64)>) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = pairs.collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
