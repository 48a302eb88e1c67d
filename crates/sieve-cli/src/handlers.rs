//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod check_rules;
mod completions;
mod validate;

pub use check_rules::handle_check_rules;
pub use completions::handle_completions;
pub use validate::handle_validate;
