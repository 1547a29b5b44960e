use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;

use crate::CorrelaError;

/// Outcome of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityTest {
    /// The W statistic, in `(0, 1]`.
    pub statistic: f64,
    /// Probability of a W at least this extreme under normality.
    pub p_value: f64,
    /// Sample size the test was run on.
    pub n: usize,
}

impl NormalityTest {
    /// True when normality is not rejected at level `alpha` (`p_value > alpha`).
    #[must_use]
    pub fn is_normal(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

// Royston (1995) polynomial coefficients.
const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_19, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.382_2, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.586_1, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.480_3, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Smallest p-value reported for small samples far in the tail.
const SMALL_SAMPLE_FLOOR: f64 = 1e-99;

fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, k| acc.mul_add(x, *k))
}

fn standard_normal() -> Result<Normal, CorrelaError> {
    Normal::new(0.0, 1.0).map_err(|e| CorrelaError::Other(format!("standard normal: {e}")))
}

/// Half of the antisymmetric Shapiro-Wilk coefficient vector, for the lower
/// order statistics.
#[allow(clippy::cast_precision_loss)]
fn coefficients(n: usize, norm: &Normal) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let an = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| norm.inverse_cdf((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();

    let mut a = vec![0.0; half];
    a[0] = poly(&C1, rsn) - m[0] / ssumm2;
    let (first_free, fac) = if n > 5 {
        a[1] = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
            / (1.0 - 2.0 * a[0].powi(2) - 2.0 * a[1].powi(2)))
        .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a[0].powi(2))).sqrt();
        (1, fac)
    };
    for i in first_free..half {
        a[i] = -m[i] / fac;
    }
    a
}

#[allow(clippy::cast_precision_loss)]
fn p_value(w: f64, n: usize, norm: &Normal) -> f64 {
    if w >= 1.0 {
        return 1.0;
    }
    let an = n as f64;
    if n == 3 {
        let pi6 = 6.0 / std::f64::consts::PI;
        let stqr = std::f64::consts::FRAC_PI_3;
        return (pi6 * (w.sqrt().asin() - stqr)).clamp(0.0, 1.0);
    }

    let y = (1.0 - w).ln();
    let (y, m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return SMALL_SAMPLE_FLOOR;
        }
        (-(gamma - y).ln(), poly(&C3, an), poly(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (y, poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };
    (1.0 - norm.cdf((y - m) / s)).clamp(0.0, 1.0)
}

/// Shapiro-Wilk test of normality (Royston's approximation).
///
/// Intended for `3 <= n <= 5000`; larger samples are still computed but the
/// p-value approximation loses accuracy there.
///
/// # Errors
/// - `InsufficientData` for fewer than three observations or a sample whose
///   values are all equal.
/// - `InvalidArg` if any value is not finite.
pub fn shapiro_wilk(sample: &[f64]) -> Result<NormalityTest, CorrelaError> {
    let n = sample.len();
    if n < 3 {
        return Err(CorrelaError::insufficient("shapiro-wilk", 3, n));
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(CorrelaError::InvalidArg(
            "shapiro-wilk sample contains non-finite values".into(),
        ));
    }

    let mut x = sample.to_vec();
    x.sort_by(f64::total_cmp);
    let range = x[n - 1] - x[0];
    if range <= 0.0 {
        return Err(CorrelaError::insufficient("shapiro-wilk distinct values", 2, 1));
    }

    let norm = standard_normal()?;
    let a = coefficients(n, &norm);

    let mean = x.iter().mean();
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let b: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();

    let mut w = (b * b / ss).min(1.0);
    if n == 3 {
        w = w.max(0.75);
    }

    Ok(NormalityTest {
        statistic: w,
        p_value: p_value(w, n, &norm),
        n,
    })
}

/// Shapiro-Wilk over a column with missing cells; `None` cells are dropped first.
///
/// # Errors
/// Same as [`shapiro_wilk`], evaluated on the present values only.
pub fn shapiro_wilk_present(column: &[Option<f64>]) -> Result<NormalityTest, CorrelaError> {
    let present: Vec<f64> = column.iter().flatten().copied().collect();
    shapiro_wilk(&present)
}
