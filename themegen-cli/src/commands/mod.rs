//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `generate` command.
/// This command builds the theme catalog and poster images for a batch.
pub mod generate;
