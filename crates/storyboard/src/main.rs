//! Storyboard CLI binary.
//!
//! This binary provides command-line access to the storyboard director:
//! - Compose a scene with the Gemini backend
//! - Load and render the built-in demo scene
//! - Inspect the shot markers of a story file

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, ComposeArgs, print_story_file, run_compose, run_demo};

    // Load .env before reading the API key
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    storyboard::telemetry::init_console_telemetry(cli.verbose)?;

    match cli.command {
        Commands::Compose {
            seed,
            mood,
            aspect,
            quality,
            continuity,
            references,
            output,
        } => {
            let config = storyboard::StoryboardConfig::load_with(cli.config.as_deref())?;
            let args = ComposeArgs {
                seed,
                mood,
                aspect,
                quality,
                continuity,
                references,
            };
            run_compose(args, &output, &config).await?;
        }

        Commands::Demo { output } => {
            let config = storyboard::StoryboardConfig::load_with(cli.config.as_deref())?;
            run_demo(&output, &config).await?;
        }

        Commands::Story { file } => {
            print_story_file(&file).await?;
        }
    }

    Ok(())
}
