//! Mate Checker
//!
//! Grades a puzzle corpus with the forced-mate search from `mate_core`.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: mate_in_4.json, mate in 4, exact grading
//! cargo run --release -p mate_checker
//!
//! # Another corpus and distance, with a JSON report
//! cargo run --release -p mate_checker -- mate_in_2.json --mate-in 2 --report report.json
//! ```

pub mod config;
pub mod output;

pub use config::{CheckerConfig, Cli, ConfigError};
