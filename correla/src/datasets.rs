//! Shipped Ethereum ecosystem tables.

use correla_core::labels::{ETH_PRICE, STABLECOINS, TRANSACTIONS, TVL};
use correla_core::{CorrelaError, PrimarySeries, PrimarySource};

/// Which of the shipped tables to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EthereumDataset {
    /// Yearly observations, 2019-01-01 through 2023-01-01.
    #[default]
    FiveYear,
    /// Observations on 2019-01-01, 2021-01-01 and 2023-01-01.
    ThreePoint,
}

/// Primary source serving one of the fixed Ethereum metric tables.
///
/// Columns, in order: TVL (bn $), transactions (mn), stablecoin
/// capitalisation (bn $), ETH price ($).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EthereumMetrics {
    dataset: EthereumDataset,
}

impl EthereumMetrics {
    /// The five-year table.
    #[must_use]
    pub const fn five_year() -> Self {
        Self {
            dataset: EthereumDataset::FiveYear,
        }
    }

    /// The three-point table.
    #[must_use]
    pub const fn three_point() -> Self {
        Self {
            dataset: EthereumDataset::ThreePoint,
        }
    }

    /// Selected dataset.
    #[must_use]
    pub const fn dataset(&self) -> EthereumDataset {
        self.dataset
    }
}

impl PrimarySource for EthereumMetrics {
    fn name(&self) -> &str {
        match self.dataset {
            EthereumDataset::FiveYear => "ethereum-metrics-2019-2023",
            EthereumDataset::ThreePoint => "ethereum-metrics-3pt",
        }
    }

    fn load(&self) -> Result<PrimarySeries, CorrelaError> {
        match self.dataset {
            EthereumDataset::FiveYear => PrimarySeries::from_columns(
                &[
                    "2019-01-01",
                    "2020-01-01",
                    "2021-01-01",
                    "2022-01-01",
                    "2023-01-01",
                ],
                vec![
                    (TVL, vec![40.0, 60.0, 80.0, 90.0, 100.0]),
                    (TRANSACTIONS, vec![0.6, 1.0, 1.5, 1.7, 1.8]),
                    (STABLECOINS, vec![30.0, 60.0, 90.0, 110.0, 120.0]),
                    (ETH_PRICE, vec![1.0, 2.0, 3.0, 3.5, 4.0]),
                ],
            ),
            EthereumDataset::ThreePoint => PrimarySeries::from_columns(
                &["2019-01-01", "2021-01-01", "2023-01-01"],
                vec![
                    (TVL, vec![40.0, 80.0, 100.0]),
                    (TRANSACTIONS, vec![0.6, 1.5, 1.8]),
                    (STABLECOINS, vec![30.0, 90.0, 120.0]),
                    (ETH_PRICE, vec![1.0, 3.0, 4.0]),
                ],
            ),
        }
    }
}
