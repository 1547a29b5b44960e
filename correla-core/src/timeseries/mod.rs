//! Time-series helpers that turn provider history into aligned-ready series.
/// Daily close extraction, local calendar dates, and daily request building.
pub mod daily;
