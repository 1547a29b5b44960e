use serde::{Deserialize, Serialize};

use crate::series::AlignedTable;

/// Pearson correlation over the rows where both `x` and `y` are present.
///
/// Returns `None` when fewer than two complete pairs remain or when either side
/// has zero variance over those pairs. A missing column therefore never
/// correlates as zero. Extra trailing cells of the longer input are ignored.
#[must_use]
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }

    let r = sxy / (sxx * syy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Symmetric matrix of pairwise-complete Pearson correlations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Column labels, in table order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True for a matrix over zero columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row-major cells.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.values
    }

    /// Correlation at `(i, j)`; `None` if undefined or out of range.
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        *self.values.get(i)?.get(j)?
    }

    /// Correlation between two labelled columns; `None` if undefined or unknown.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        self.at(i, j)
    }
}

/// Pairwise Pearson correlation over every column of `table`.
///
/// Each pair only uses rows where both cells are present. The diagonal is
/// exactly `1.0` for any column with at least two present, non-constant values
/// and `None` otherwise.
#[must_use]
pub fn correlation_matrix(table: &AlignedTable) -> CorrelationMatrix {
    let cols = table.columns();
    let k = cols.len();
    let mut values = vec![vec![None; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = pearson(&cols[i].values, &cols[j].values);
            let r = if i == j { r.map(|_| 1.0) } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        labels: cols.iter().map(|c| c.label.clone()).collect(),
        values,
    }
}
