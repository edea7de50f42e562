//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storyboard::{AspectRatio, Mood, Quality};

/// Storyboard director - scene idea in, linked story and rendered shots out
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Turn a scene idea into a story, a shotlist and rendered frames", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story and shotlist from a scene idea
    Compose {
        /// Scene idea
        #[arg(long)]
        seed: String,

        /// Visual mood
        #[arg(long, default_value = "cinematic")]
        mood: Mood,

        /// Frame shape (16:9, 3:2 or 1:1)
        #[arg(long, default_value = "16:9")]
        aspect: AspectRatio,

        /// Rendering quality hint
        #[arg(long, default_value = "draft")]
        quality: Quality,

        /// Details every image must keep consistent
        #[arg(long, default_value = "")]
        continuity: String,

        /// Anchor image for character likeness (repeatable)
        #[arg(long = "reference")]
        references: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Load the built-in rooftop scene
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the shot-linked segments of a story file
    Story {
        /// Text file containing `[SHOT:shot_N]` markers
        file: PathBuf,
    },
}

/// What to do once the story is ready.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Render every shot after the story is ready
    #[arg(long)]
    pub generate: bool,

    /// Write a ZIP archive once every shot has finished
    #[arg(long, requires = "generate")]
    pub export: bool,

    /// Archive directory (defaults to `export.output_dir`)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}
