// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod model;

pub mod csv;
pub mod file;
pub mod merge;
pub mod pattern;
pub mod predict;
pub mod progress;
pub mod report;
pub mod runner;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod log;

pub use error::{Error, Result};
pub use model::{HistoricalRecord, Pattern, Prediction, RawEntry};
