//! Conversion of aligned tables into `polars` data frames.

use polars::prelude::{Column as PlColumn, DataFrame, NamedFrom};

use crate::CorrelaError;
use crate::series::AlignedTable;

/// Name of the ISO date column in the exported frame.
pub const DATE_COLUMN: &str = "date";

impl AlignedTable {
    /// Export as a `DataFrame`: a `date` string column followed by one nullable
    /// `f64` column per table column. Missing cells become nulls.
    ///
    /// # Errors
    /// Returns `Data` if `polars` rejects the frame (e.g. a column label equal
    /// to `date`).
    pub fn to_dataframe(&self) -> Result<DataFrame, CorrelaError> {
        let mut cols = Vec::with_capacity(self.columns().len() + 1);
        let dates: Vec<String> = self.dates().iter().map(ToString::to_string).collect();
        cols.push(PlColumn::new(DATE_COLUMN.into(), dates));
        for c in self.columns() {
            cols.push(PlColumn::new(c.label.as_str().into(), c.values.clone()));
        }
        DataFrame::new(cols).map_err(|e| CorrelaError::Data(format!("dataframe: {e}")))
    }
}
