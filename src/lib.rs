//! Structural metrics, architectural role buckets and HTTP route tables for
//! Java source trees.
//!
//! [`core::Engine`] walks a directory, lowers each file through a
//! tree-sitter parser, classifies every type into controller, service,
//! repository, entity and domain buckets, and rebuilds the Spring and JAX-RS
//! route table from annotations.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use error::{MetricsError, Result};
