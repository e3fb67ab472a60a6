//! zplane - pole/zero frequency response tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use zplane_core::presets::Preset;
use zplane_editor::state::MagnitudeScale;
use zplane_tools::{
    init_logging, render_chart, replay, ChartSize, OutputFormat, ReplayScript, ResponseConfig,
    ResponseTool,
};

/// Pole/zero filter frequency response analysis
#[derive(Parser)]
#[command(name = "zplane")]
#[command(about = "Frequency response of discrete-time filters from their poles and zeros")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a filter's frequency response
    Response(ResponseConfig),
    /// List built-in filters
    Presets,
    /// Replay a recorded editor session
    Replay {
        /// Replay script (TOML)
        #[arg(short, long)]
        script: PathBuf,

        /// Draw the final magnitude curve
        #[arg(long)]
        plot: bool,
    },
}

fn write_output(text: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write output: {:?}", path))?;
            println!("✓ Response written to {:?}", path);
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn show_presets() {
    println!("Built-in filters:");
    for preset in Preset::ALL {
        println!("  {:<10} {}", preset.name(), preset.description());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.debug);
    info!("zplane starting");

    match cli.command {
        Commands::Response(config) => {
            let scale = MagnitudeScale::from(config.scale);
            let format = config.format;
            let plot = config.plot;
            let output = config.output.clone();

            let report = ResponseTool::new(config).run()?;
            let rendered = report.render(format, scale)?;
            write_output(&rendered, output.as_ref())?;

            if plot {
                print!("{}", render_chart(&report.response, scale, ChartSize::default()));
            }
            if format != OutputFormat::Table && output.is_some() {
                print!("{}", report.summary_text());
            }
        }

        Commands::Presets => show_presets(),

        Commands::Replay { script, plot } => {
            let script = ReplayScript::from_file(&script)?;
            let outcome = replay(&script)?;

            println!(
                "✓ Replayed {} events ({} changed the plot)",
                script.events.len(),
                outcome.applied
            );
            print!("{}", outcome.report.summary_text());
            if plot {
                print!(
                    "{}",
                    render_chart(&outcome.report.response, outcome.scale, ChartSize::default())
                );
            }
        }
    }

    Ok(())
}
