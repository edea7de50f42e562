//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyboard binary.

mod commands;
mod printer;
mod run;
mod story;

pub use commands::{Cli, Commands, OutputArgs};
pub use run::{ComposeArgs, run_compose, run_demo};
pub use story::print_story_file;
