use std::path::PathBuf;

use correla_core::{AlignedTable, Chart, CorrelaError, PrimarySeries, align};

use crate::acquire::Acquisition;
use crate::analysis::{AnalysisReport, analyze};
use crate::core::Correla;
use crate::report::{Reporter, RunSummary};

/// Primary table, acquisition outcome and the table aligned from them.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// The primary table as loaded.
    pub primary: PrimarySeries,
    /// Outcome of the secondary acquisition.
    pub acquisition: Acquisition,
    /// Primary columns plus the aligned secondary column.
    pub table: AlignedTable,
}

impl Correla {
    /// Load the primary table, acquire the secondary series and align them.
    ///
    /// # Errors
    /// Only primary-table problems are errors (see [`Correla::load_primary`]).
    /// Acquisition failures yield an all-missing secondary column instead.
    pub async fn prepare(&self) -> Result<Prepared, CorrelaError> {
        let primary = self.load_primary()?;
        let acquisition = self.acquire(&primary).await;
        let table = align(
            &primary,
            acquisition.series(),
            &self.cfg.secondary.label,
        );
        Ok(Prepared {
            primary,
            acquisition,
            table,
        })
    }

    /// Correlations and normality checks for `table` under the active configuration.
    #[must_use]
    pub fn analyze(&self, table: &AlignedTable) -> AnalysisReport {
        analyze(table, &self.cfg)
    }

    /// Columns drawn on the trend chart: every column not excluded by configuration.
    #[must_use]
    pub fn trend_columns(&self, table: &AlignedTable) -> Vec<String> {
        table
            .labels()
            .filter(|l| !self.cfg.trend_exclude.iter().any(|x| x == l))
            .map(str::to_string)
            .collect()
    }

    /// Render every chart with the registered renderer.
    ///
    /// Returns the written paths and the failures; a failed chart does not stop
    /// the others. Without a renderer both lists are empty.
    pub fn render_charts(
        &self,
        table: &AlignedTable,
        analysis: &AnalysisReport,
    ) -> (Vec<PathBuf>, Vec<CorrelaError>) {
        let Some(renderer) = &self.renderer else {
            return (Vec::new(), Vec::new());
        };

        let trend_columns = self.trend_columns(table);
        let mut charts = Vec::with_capacity(3);
        if let Some((x, y)) = &self.cfg.focus_pair {
            charts.push(Chart::Scatter { table, x, y });
        }
        charts.push(Chart::Heatmap {
            matrix: &analysis.matrix,
        });
        charts.push(Chart::Trends {
            table,
            columns: &trend_columns,
        });

        let mut written = Vec::new();
        let mut failures = Vec::new();
        for chart in &charts {
            match renderer.render(chart, &self.cfg.output_dir) {
                Ok(path) => written.push(path),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        renderer = renderer.name(),
                        chart = chart.file_name(),
                        error = %e,
                        "chart rendering failed"
                    );
                    failures.push(e);
                }
            }
        }
        (written, failures)
    }

    /// Run the whole pipeline and hand the summary to `reporter`.
    ///
    /// # Errors
    /// Returns an error if the primary table cannot be loaded or the reporter
    /// fails. Acquisition and rendering problems are recorded in the summary.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "correla::run", skip(self, reporter))
    )]
    pub async fn run(&self, reporter: &mut dyn Reporter) -> Result<RunSummary, CorrelaError> {
        let Prepared {
            acquisition, table, ..
        } = self.prepare().await?;
        let analysis = self.analyze(&table);
        let (charts, render_failures) = self.render_charts(&table, &analysis);

        let summary = RunSummary {
            primary_name: self.primary.name().to_string(),
            table,
            acquisition,
            analysis,
            charts,
            render_failures,
        };
        reporter.report(&summary)?;
        Ok(summary)
    }
}
