//! Maven Build Model
//!
//! An order-preserving, mergeable in-memory model of a Maven build: plugins,
//! executions and resources are registered by identity, and every later add
//! for the same identity customizes the existing entry instead of replacing it.

pub mod build;
pub mod cli;
pub mod descriptor;
pub mod error;
pub mod logging;
pub mod output;
pub mod registry;

pub use build::{MavenBuild, MavenPlugin, MavenResource};
pub use error::{Error, RegistryError, Result};
pub use registry::{Entity, KeyedRegistry};
