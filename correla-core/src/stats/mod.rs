//! Descriptive statistics over aligned columns.
//!
//! - `correlation`: pairwise-complete Pearson correlation and the matrix over a table
//! - `normality`: the Shapiro-Wilk test
/// Pearson correlation and correlation matrices.
pub mod correlation;
/// Shapiro-Wilk normality testing.
pub mod normality;
