//! # oneonone
//!
//! Analytics for recurring 1:1 meetings between managers and collaborators.
//!
//! ## Usage
//!
//! ```bash
//! oneonone serve --port 8080
//! oneonone report annual --collaborator ana --year 2024
//! ```
//!
//! ## Modules
//!
//! - `analytics` - Journey models, metric extraction, classifiers and report assembly
//! - `config` - Service configuration from TOML and environment
//! - `import` - Loading journeys from JSON exports
//! - `storage` - Journey persistence behind the `JourneyStore` trait
pub mod analytics;
pub mod config;
pub mod error;
pub mod import;
pub mod storage;


pub use error::{Error, Result};
