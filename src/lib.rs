//! titidy: house-style formatter for TurboIntegrator (TI) scripts.
//!
//! Canonical keyword and function-name casing, nesting indentation,
//! operator padding, bounded blank-line runs and removal of decorative
//! `#####` separators, applied as a fixed pipeline of line-level stages.

pub mod analytics;
pub mod classify;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod script;
pub mod stages;

pub use config::TidyConfig;
pub use pipeline::{Pipeline, StyleContext, TidyOutput, tidy};
