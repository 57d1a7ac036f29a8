//! Scaffolder materializes a directory and file tree from a declarative YAML
//! structure. It substitutes `{{TOKEN}}`s in names and contents, includes
//! optional components on request, and can be re-applied to an existing tree
//! without clobbering it.

/// Command-line interface module for the scaffolder binary
pub mod cli;

/// Structure document model and YAML loading
pub mod config;

/// File write conflict policy (force / add-mode)
pub mod conflict;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Optional component and `only_if` inclusion rules
pub mod inclusion;

/// Logger setup for the binary
pub mod logger;

/// Static tree preview of a structure document
pub mod preview;

/// Tree traversal that creates directories and files
/// or records what would be created in dry-run mode
pub mod processor;

/// Variable mapping and token substitution
pub mod variables;
