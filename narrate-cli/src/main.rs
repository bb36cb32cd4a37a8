//! Narrate CLI - one-shot generator for Reading Club voice instructions.
//!
//! Reads the OpenAI API key from a `.env` file, synthesizes the built-in
//! instruction table entry by entry, writes the MP3 files under
//! `audio/instructions/`, and prints a summary.

#![allow(clippy::print_stdout, clippy::print_stderr)] // CLI program intentionally uses stdout

mod instructions;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use narrate::prelude::*;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Generate the Reading Club voice instruction audio files
#[derive(Parser)]
#[command(name = "narrate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Credential file scanned for OPENAI_API_KEY
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Directory the audio files are written into
    #[arg(long, default_value = "audio/instructions")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("narrate={level},narrate_cli={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
///
/// Only pre-batch setup failures (missing credential, unusable output
/// directory) bubble up and turn into a nonzero exit; per-entry failures are
/// reported in the summary and the process still exits zero.
async fn run(cli: Cli) -> Result<()> {
    // Fails fast before any network activity if the key is absent.
    let api_key = load_api_key(&cli.env_file)?;
    println!("✅ Loaded API key from {}", cli.env_file.display());

    let newly_created = !cli.output_dir.exists();
    std::fs::create_dir_all(&cli.output_dir)?;
    if newly_created {
        println!("✅ Created {}", cli.output_dir.display());
    }

    let client = OpenAI::new(OpenAIConfig::new(api_key))?;
    let table = instructions::instruction_table();
    let options = BatchOptions::new(&cli.output_dir);

    println!(
        "🎤 Generating {} voice instructions with OpenAI TTS ({} voice)...\n",
        table.len(),
        options.voice.id
    );

    let report = narrate::batch::run_with_observer(&client, &table, &options, |outcome| {
        match &outcome.result {
            Ok(file) => {
                let name = file
                    .path
                    .file_name()
                    .map_or_else(|| outcome.id.clone(), |n| n.to_string_lossy().into_owned());
                println!("✅ Generated: {name}");
            }
            Err(reason) => println!("❌ {}: {reason}", outcome.id),
        }
    })
    .await?;

    print_summary(&report, &cli.output_dir);

    Ok(())
}

/// Print the end-of-run summary block.
fn print_summary(report: &BatchReport, output_dir: &std::path::Path) {
    println!("\n📊 Summary:");
    println!("   ✅ Success: {}/{}", report.succeeded(), report.total());
    println!("   ❌ Failed: {}/{}", report.failed(), report.total());
    println!("   💰 Estimated cost: ${:.2}", report.estimated_cost());
    println!("\n✨ Voice files saved to: {}", output_dir.display());
}
