//! Core types for pardu.
//!
//! This crate holds the data structures shared by the traversal engine and
//! the command-line front end: scan configuration, the exclusion set, tree
//! nodes and run summaries.

mod config;
mod error;
mod exclude;
mod node;
mod summary;

pub use config::{MAX_DEPTH, ScanConfig, ScanConfigBuilder};
pub use error::ScanError;
pub use exclude::ExclusionSet;
pub use node::{NodeKind, TreeNode};
pub use summary::ScanSummary;
