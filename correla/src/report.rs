//! Run summary and console reporting.

use std::io::Write;
use std::path::PathBuf;

use correla_core::{AlignedTable, CorrelaError, DATE_FORMAT};

use crate::acquire::Acquisition;
use crate::analysis::{AnalysisReport, NormalityOutcome};

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Name of the primary dataset.
    pub primary_name: String,
    /// The aligned table.
    pub table: AlignedTable,
    /// Outcome of the secondary acquisition.
    pub acquisition: Acquisition,
    /// Correlations and normality checks.
    pub analysis: AnalysisReport,
    /// Paths of the charts that were written.
    pub charts: Vec<PathBuf>,
    /// Charts that failed to render. They never fail the run.
    pub render_failures: Vec<CorrelaError>,
}

/// Sink for a finished run.
pub trait Reporter {
    /// Present `summary`.
    ///
    /// # Errors
    /// Returns `Io` if the underlying sink fails.
    fn report(&mut self, summary: &RunSummary) -> Result<(), CorrelaError>;
}

/// Plain-text reporter writing to any `io::Write`.
///
/// Missing cells print as `-`, undefined correlations as `n/a`.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<std::io::Stdout> {
    /// Reporter bound to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(&mut self, name: &str, table: &AlignedTable) -> Result<(), CorrelaError> {
        writeln!(self.out, "Loaded data ({name}):")?;
        let header: Vec<String> = std::iter::once("Date".to_string())
            .chain(table.labels().map(str::to_string))
            .collect();
        let rows: Vec<Vec<String>> = (0..table.len())
            .filter_map(|i| table.row(i))
            .map(|(date, cells)| {
                std::iter::once(date.format(DATE_FORMAT).to_string())
                    .chain(cells.into_iter().map(fmt_cell))
                    .collect()
            })
            .collect();
        write_grid(&mut self.out, header, rows)
    }

    fn write_normality(&mut self, analysis: &AnalysisReport) -> Result<(), CorrelaError> {
        if analysis.normality.is_empty() {
            return Ok(());
        }
        writeln!(
            self.out,
            "\nNormality check (Shapiro-Wilk, alpha = {}):",
            analysis.alpha
        )?;
        for outcome in &analysis.normality {
            match outcome {
                NormalityOutcome::Tested { column, test } => writeln!(
                    self.out,
                    "{column}: W = {:.3}, p-value = {:.3} (normal: {})",
                    test.statistic,
                    test.p_value,
                    if test.is_normal(analysis.alpha) { "yes" } else { "no" }
                )?,
                NormalityOutcome::Skipped { column, reason } => {
                    writeln!(self.out, "{column}: skipped ({reason})")?;
                }
            }
        }
        Ok(())
    }

    fn write_correlations(&mut self, analysis: &AnalysisReport) -> Result<(), CorrelaError> {
        if let Some(focus) = &analysis.focus {
            writeln!(
                self.out,
                "\nCorrelation between {} and {}: {}",
                focus.x,
                focus.y,
                fmt_corr(focus.value)
            )?;
        }

        let m = &analysis.matrix;
        writeln!(self.out, "\nCorrelation matrix:")?;
        let header: Vec<String> = std::iter::once(String::new())
            .chain(m.labels().iter().cloned())
            .collect();
        let rows: Vec<Vec<String>> = m
            .labels()
            .iter()
            .zip(m.rows())
            .map(|(label, row)| {
                std::iter::once(label.clone())
                    .chain(row.iter().map(|v| fmt_corr(*v)))
                    .collect()
            })
            .collect();
        write_grid(&mut self.out, header, rows)
    }

    fn write_charts(&mut self, summary: &RunSummary) -> Result<(), CorrelaError> {
        if summary.charts.is_empty() && summary.render_failures.is_empty() {
            return Ok(());
        }
        writeln!(self.out)?;
        for path in &summary.charts {
            writeln!(self.out, "Chart saved as '{}'", path.display())?;
        }
        for err in &summary.render_failures {
            writeln!(self.out, "Chart not saved: {err}")?;
        }
        Ok(())
    }
}

fn fmt_cell(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |x| x.to_string())
}

fn fmt_corr(v: Option<f64>) -> String {
    v.map_or_else(|| "n/a".to_string(), |r| format!("{r:.3}"))
}

/// Left-aligned columns separated by two spaces, trailing blanks trimmed.
fn write_grid<W: Write>(
    out: &mut W,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
) -> Result<(), CorrelaError> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    for line in std::iter::once(&header).chain(&rows) {
        let text = line
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{}", text.trim_end())?;
    }
    Ok(())
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, summary: &RunSummary) -> Result<(), CorrelaError> {
        self.write_table(&summary.primary_name, &summary.table)?;
        if let Some(notice) = summary.acquisition.notice() {
            writeln!(self.out, "\nNotice: {notice}")?;
        }
        self.write_normality(&summary.analysis)?;
        self.write_correlations(&summary.analysis)?;
        self.write_charts(summary)?;
        self.out.flush()?;
        Ok(())
    }
}
