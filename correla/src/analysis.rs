//! Descriptive analysis of an aligned table: correlations and normality checks.

use correla_core::{
    AlignedTable, CorrelaConfig, CorrelationMatrix, NormalityTest, correlation_matrix,
    shapiro_wilk_present,
};

/// Correlation of the configured focus pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusCorrelation {
    /// First column label (scatter x axis).
    pub x: String,
    /// Second column label (scatter y axis).
    pub y: String,
    /// Pairwise-complete Pearson correlation; `None` when undefined or a label is unknown.
    pub value: Option<f64>,
}

/// Result of checking one column for normality.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalityOutcome {
    /// The test ran.
    Tested {
        /// Column label.
        column: String,
        /// Test result.
        test: NormalityTest,
    },
    /// The column could not be tested (unknown label or degenerate sample).
    Skipped {
        /// Column label.
        column: String,
        /// Why the test did not run.
        reason: String,
    },
}

impl NormalityOutcome {
    /// Label of the checked column.
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Tested { column, .. } | Self::Skipped { column, .. } => column,
        }
    }
}

/// Everything computed from an aligned table.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Full pairwise-complete correlation matrix.
    pub matrix: CorrelationMatrix,
    /// Focus-pair correlation, if a pair is configured.
    pub focus: Option<FocusCorrelation>,
    /// One outcome per configured normality column, in configuration order.
    pub normality: Vec<NormalityOutcome>,
    /// Significance level used for the normality verdicts.
    pub alpha: f64,
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "correla::analysis::normality", skip(table))
)]
fn check_normality(table: &AlignedTable, column: &str) -> NormalityOutcome {
    let Some(col) = table.column(column) else {
        return NormalityOutcome::Skipped {
            column: column.to_string(),
            reason: "column not in table".to_string(),
        };
    };
    match shapiro_wilk_present(&col.values) {
        Ok(test) => NormalityOutcome::Tested {
            column: column.to_string(),
            test,
        },
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %e, "normality check skipped");
            NormalityOutcome::Skipped {
                column: column.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

/// Run the correlation summary and the configured normality checks.
#[must_use]
pub fn analyze(table: &AlignedTable, cfg: &CorrelaConfig) -> AnalysisReport {
    let matrix = correlation_matrix(table);
    let focus = cfg.focus_pair.as_ref().map(|(x, y)| FocusCorrelation {
        x: x.clone(),
        y: y.clone(),
        value: matrix.get(x, y),
    });
    let normality = cfg
        .normality_columns
        .iter()
        .map(|c| check_normality(table, c))
        .collect();
    AnalysisReport {
        matrix,
        focus,
        normality,
        alpha: cfg.normality_alpha,
    }
}
