//! Correla-specific configuration primitives and the shared error type, built on top of `paft`.
#![warn(missing_docs)]

mod config;
mod error;
pub mod labels;

pub use config::{AcquisitionMode, BackoffConfig, CorrelaConfig, RetryConfig, SecondaryConfig};
pub use error::CorrelaError;
