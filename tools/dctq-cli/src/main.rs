use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dctq::{
    dump, load_rgb_planes_with, save_rgb_planes_with, Analyzer, AnalyzerOptions, Channel,
    ImageAnalysis, OutputLayout, Pipeline, RgbPlanes, RowOrder, RunOutcome, SqnrReport,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dctq")]
#[command(version, about = "Block DCT quantization analyzer - per-frequency SQNR of JPEG-style quantization", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Treat plane row 0 as the top of the picture instead of the first stored BMP row
    #[arg(long, global = true)]
    top_down: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the R, G and B planes of an image as text
    Dump {
        /// Input image (BMP or PNG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory receiving R.txt, G.txt, B.txt and dim.txt
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Convert to YCbCr, transform, quantize and report SQNR per frequency
    Analyze {
        /// Input image (BMP or PNG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory receiving quantization tables and coefficient streams
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Report format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Do not warn when dimensions are not multiples of 8
        #[arg(long)]
        quiet_truncation: bool,
    },

    /// Rebuild a BMP from text channel dumps
    Reassemble {
        /// Directory holding R.txt, G.txt, B.txt and dim.txt
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Output bitmap
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable tables
    Human,
    /// JSON output
    Json,
}

#[derive(Serialize)]
struct PlaneSummary {
    channel: Channel,
    complete: bool,
    blocks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    sqnr: Option<SqnrReport>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let order = if cli.top_down {
        RowOrder::TopDown
    } else {
        RowOrder::BottomUp
    };

    match cli.command {
        Commands::Dump { input, out_dir } => {
            let image = load(&input, order)?;
            let analyzer = Analyzer::new(AnalyzerOptions::new().output_dir(&out_dir));
            analyzer
                .run(Pipeline::ChannelDump, &image)
                .with_context(|| format!("Failed to dump channels into {}", out_dir.display()))?;
            info!("Wrote channel dumps to {}", out_dir.display());
        }
        Commands::Analyze {
            input,
            out_dir,
            format,
            quiet_truncation,
        } => {
            let image = load(&input, order)?;
            let options = AnalyzerOptions::new()
                .output_dir(&out_dir)
                .warn_on_truncation(!quiet_truncation);
            let outcome = Analyzer::new(options)
                .run(Pipeline::TransformQuantize, &image)
                .with_context(|| format!("Failed to analyze {}", input.display()))?;

            if let RunOutcome::Analyzed(analysis) = outcome {
                match format {
                    OutputFormat::Human => print_human(&analysis),
                    OutputFormat::Json => print_json(&analysis)?,
                }
                let failed = analysis.planes.iter().filter(|p| p.is_err()).count();
                if failed > 0 {
                    bail!("{} of {} planes did not complete", failed, analysis.planes.len());
                }
            }
        }
        Commands::Reassemble { dir, output } => {
            let image = reassemble(&OutputLayout::new(&dir))?;
            save_rgb_planes_with(&output, &image, order)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote {} ({})", output.display(), image.dimensions());
        }
    }

    Ok(())
}

fn load(input: &Path, order: RowOrder) -> Result<RgbPlanes> {
    load_rgb_planes_with(input, order).with_context(|| format!("Failed to load {}", input.display()))
}

fn reassemble(layout: &OutputLayout) -> Result<RgbPlanes> {
    let dims_path = layout.dimensions_path();
    let dimensions = dump::open_text_file(&dims_path)
        .and_then(dump::read_dimensions)
        .with_context(|| format!("Failed to read {}", dims_path.display()))?;

    let read = |label: &str| -> Result<_> {
        let path = layout.channel_dump_path(label);
        dump::open_text_file(&path)
            .and_then(|reader| dump::read_plane_text::<u8, _>(reader, dimensions))
            .with_context(|| format!("Failed to read {}", path.display()))
    };

    Ok(RgbPlanes::new(read("R")?, read("G")?, read("B")?)?)
}

fn print_human(analysis: &ImageAnalysis) {
    for result in &analysis.planes {
        let (channel, stats) = match result {
            Ok(stats) => (stats.channel, Some(stats)),
            Err(abort) => (abort.channel, abort.partial.as_ref()),
        };
        let Some(stats) = stats else {
            continue;
        };
        println!("\n{} channel SQNR (dB):", channel);
        print!("{}", stats.report());
    }
}

fn print_json(analysis: &ImageAnalysis) -> Result<()> {
    let summaries: Vec<PlaneSummary> = analysis
        .planes
        .iter()
        .map(|result| match result {
            Ok(stats) => PlaneSummary {
                channel: stats.channel,
                complete: true,
                blocks: stats.blocks,
                error: None,
                sqnr: Some(stats.report()),
            },
            Err(abort) => PlaneSummary {
                channel: abort.channel,
                complete: false,
                blocks: abort.partial.as_ref().map_or(0, |p| p.blocks),
                error: Some(abort.error.to_string()),
                sqnr: abort.partial.as_ref().map(|p| p.report()),
            },
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
