#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for drupal-eval
//!
//! This library holds all functionality for the drupal-eval tool, which scores
//! contributed Drupal projects on maintenance, quality, and adoption signals.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`registry`]: Access to the project registry's node API
//! - [`issues`]: Paginated issue counting and aggregation
//! - [`releases`]: Branch parsing, release selection, and release statistics
//! - [`analysis`]: Concurrent external static-analysis tools
//! - [`scoring`]: The weighted scoring model
//! - [`pipeline`]: Per-project evaluation and batch orchestration
//! - [`reports`]: Report generation in multiple formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod analysis;
pub mod error;
pub mod issues;
pub mod pipeline;
pub mod registry;
pub mod releases;
pub mod reports;
pub mod scoring;

pub use crate::commands::{Host, run};
pub use crate::error::EvalError;
