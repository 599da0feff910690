//! Lossless segment concatenation via ffmpeg's concat demuxer.
//!
//! The segments were already normalized to identical codec parameters
//! during export, so the final join is a pure stream copy. The demuxer
//! reads a line-oriented manifest of single-quoted paths; embedded single
//! quotes are escaped with the close-quote/backslash-quote/open-quote
//! idiom so arbitrary paths survive the demuxer's parser.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ExportRequest;
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandRunner, FFMPEG};
use crate::workspace::SegmentWorkspace;

/// Escape a path for a single-quoted concat manifest entry.
///
/// A `'` inside the path becomes `'\''`: close the quoted run, emit a
/// backslash-escaped quote, reopen the quoted run.
pub fn escape_manifest_path(path: &str) -> String {
    path.replace('\'', "'\\''")
}

/// Write the concat demuxer manifest: one `file '<path>'` line per
/// segment, in output order, with a trailing newline.
pub fn write_manifest(segment_paths: &[PathBuf], manifest_path: &Path) -> CoreResult<()> {
    let mut file = File::create(manifest_path)?;
    for segment in segment_paths {
        writeln!(
            file,
            "file '{}'",
            escape_manifest_path(&segment.to_string_lossy())
        )?;
    }
    file.flush()?;
    Ok(())
}

/// Build the ffmpeg argument list for the stream-copy concat pass.
pub fn build_concat_args(manifest_path: &Path, output: &Path) -> Vec<String> {
    vec![
        "-hide_banner".to_string(),
        "-y".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        manifest_path.to_string_lossy().into_owned(),
        "-c".to_string(),
        "copy".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Join the exported segments into the final output file.
pub fn concat_segments(
    segment_paths: &[PathBuf],
    workspace: &SegmentWorkspace,
    request: &ExportRequest,
    runner: &dyn CommandRunner,
) -> CoreResult<()> {
    if segment_paths.is_empty() {
        return Err(CoreError::NoRegions);
    }

    let manifest_path = workspace.manifest_path();
    write_manifest(segment_paths, &manifest_path)?;

    let args = build_concat_args(&manifest_path, &request.output);
    runner
        .run(FFMPEG, &args)
        .map_err(|e| CoreError::Concat(Box::new(e)))
}
