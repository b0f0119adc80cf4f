//! Core support for oxidized-gx
//!
//! Settings, error types and logging shared by the input crate and the
//! replay binary.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
