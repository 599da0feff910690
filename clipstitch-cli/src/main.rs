// clipstitch-cli/src/main.rs
//
// Command-line interface for the clipstitch region-export pipeline.
// Responsibilities:
// - Parsing CLI arguments into an ExportRequest (or loading one from a
//   JSON file, the same shape an upload service would post).
// - Setting up logging via env_logger (RUST_LOG, default "info").
// - Checking that ffmpeg is available before any work starts.
// - Invoking clipstitch_core::export_regions and mapping failures to a
//   non-zero exit code.

use anyhow::{bail, Context, Result};
use clap::Parser;
use clipstitch_core::{
    check_dependency, export_regions, ExecCommandRunner, ExportRequest, Region, FFMPEG,
};
use log::debug;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "clipstitch: trim and concatenate video regions via ffmpeg",
    long_about = "Trims an ordered list of time regions out of a video file, optionally \
speed-adjusted and rescaled, and losslessly concatenates them into a single output."
)]
struct Cli {
    /// Input video file
    #[arg(value_name = "INPUT", required_unless_present = "request")]
    input: Option<PathBuf>,

    /// Output video file
    #[arg(value_name = "OUTPUT", required_unless_present = "request")]
    output: Option<PathBuf>,

    /// Region to include as START:END in seconds (repeatable, output order)
    #[arg(
        short,
        long = "region",
        value_name = "START:END",
        value_parser = parse_region
    )]
    regions: Vec<Region>,

    /// Load a full export request from a JSON file instead of flags
    #[arg(long, value_name = "FILE", conflicts_with_all = ["input", "output", "regions"])]
    request: Option<PathBuf>,

    /// Playback speed factor (audio tempo kept in sync)
    #[arg(long, value_name = "FACTOR", default_value_t = 1.0)]
    speed: f64,

    /// Output height in pixels, clamped to 144-1080
    #[arg(long = "height", value_name = "PIXELS", default_value_t = 1080)]
    output_height: u32,

    /// Constant rate factor for the video encoder
    #[arg(long, value_name = "CRF", default_value_t = 20)]
    crf: u32,

    /// Encoder speed/quality preset
    #[arg(long, value_name = "PRESET", default_value = "veryfast")]
    preset: String,

    /// Video encoder
    #[arg(long = "vcodec", value_name = "CODEC", default_value = "libx264")]
    video_codec: String,

    /// Audio encoder
    #[arg(long = "acodec", value_name = "CODEC", default_value = "aac")]
    audio_codec: String,

    /// Keep the intermediate segment workspace after the export
    #[arg(long)]
    keep_temp: bool,
}

/// Parse a region argument of the form "START:END" (seconds).
fn parse_region(value: &str) -> Result<Region, String> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{value}'"))?;

    let start: f64 = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start time '{start}'"))?;
    let end: f64 = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid end time '{end}'"))?;

    Ok(Region { start, end })
}

fn build_request(cli: Cli) -> Result<ExportRequest> {
    if let Some(request_path) = &cli.request {
        let contents = fs::read_to_string(request_path)
            .with_context(|| format!("failed to read request file {}", request_path.display()))?;
        let request: ExportRequest = serde_json::from_str(&contents)
            .with_context(|| format!("invalid request file {}", request_path.display()))?;
        return Ok(request);
    }

    // clap guarantees both paths are present when --request is absent.
    let input = cli.input.expect("input is required without --request");
    let output = cli.output.expect("output is required without --request");

    if cli.regions.is_empty() {
        bail!("no regions given; pass at least one --region START:END");
    }

    let mut request = ExportRequest::new(input, cli.regions, output);
    request.speed = cli.speed;
    request.output_height = cli.output_height;
    request.crf = cli.crf;
    request.preset = cli.preset;
    request.video_codec = cli.video_codec;
    request.audio_codec = cli.audio_codec;
    request.keep_temp_files = cli.keep_temp;
    Ok(request)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let request = build_request(cli)?;
    debug!(
        "Export request: {} region(s), speed {}, height {}",
        request.regions.len(),
        request.speed,
        request.output_height
    );

    check_dependency(FFMPEG).context("ffmpeg is required but was not found")?;

    let output = export_regions(&request, &ExecCommandRunner)
        .context("export failed")?;
    println!("{}", output.display());
    Ok(())
}
