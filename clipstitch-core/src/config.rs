use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::regions::{validate_regions, Region};

/// One complete export request: input, ordered regions, output, and the
/// encoding parameters applied to every segment.
///
/// Constructed by the caller (CLI flags or a JSON body from an upload
/// service) and consumed once by `export_regions`. Unspecified fields take
/// the defaults below when deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Path to the source video file
    #[serde(alias = "inputPath")]
    pub input: PathBuf,

    /// Time regions to include, in output order
    pub regions: Vec<Region>,

    /// Path of the final output file
    #[serde(alias = "outPath", alias = "outputPath")]
    pub output: PathBuf,

    /// Playback speed factor (1 = unchanged)
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Requested output height in pixels, clamped to [144, 1080]
    #[serde(default = "default_output_height")]
    pub output_height: u32,

    /// Constant rate factor passed to the video encoder
    #[serde(default = "default_crf")]
    pub crf: u32,

    /// Encoder speed/quality tradeoff preset
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Video encoder name
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Audio encoder name
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Keep the per-request segment workspace after the export finishes
    #[serde(default)]
    pub keep_temp_files: bool,
}

fn default_speed() -> f64 {
    1.0
}

fn default_output_height() -> u32 {
    1080
}

fn default_crf() -> u32 {
    20
}

fn default_preset() -> String {
    "veryfast".to_string()
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

impl ExportRequest {
    /// Create a request with default encoding parameters.
    pub fn new(
        input: impl Into<PathBuf>,
        regions: Vec<Region>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            regions,
            output: output.into(),
            speed: default_speed(),
            output_height: default_output_height(),
            crf: default_crf(),
            preset: default_preset(),
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            keep_temp_files: false,
        }
    }

    /// Validate the request before any subprocess is spawned.
    pub fn validate(&self) -> CoreResult<()> {
        if !Path::new(&self.input).is_file() {
            return Err(CoreError::InvalidRequest(format!(
                "input file not found: {}",
                self.input.display()
            )));
        }

        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(CoreError::InvalidRequest(format!(
                "speed must be a positive number, got {}",
                self.speed
            )));
        }

        validate_regions(&self.regions)
    }
}
