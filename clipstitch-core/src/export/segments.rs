//! Per-region segment transcoding.
//!
//! Each region becomes one self-contained segment file, produced by a
//! single ffmpeg invocation that trims the source at absolute start/end
//! seconds and applies the request's scale, speed, and codec settings.
//! Segments are exported strictly in input order, one process at a time;
//! the first non-zero exit aborts the remaining regions.

use log::info;
use std::path::{Path, PathBuf};

use super::ExportStage;
use crate::config::ExportRequest;
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandRunner, FFMPEG};
use crate::filters::{atempo_filters_for_speed, video_filters_for};
use crate::regions::Region;
use crate::workspace::SegmentWorkspace;

/// Build the ffmpeg argument list for one region's trim+transcode pass.
pub fn build_segment_args(
    request: &ExportRequest,
    region: &Region,
    segment_path: &Path,
) -> Vec<String> {
    let mut args = vec![
        "-hide_banner".to_string(),
        "-y".to_string(),
        "-i".to_string(),
        request.input.to_string_lossy().into_owned(),
        "-ss".to_string(),
        format!("{}", region.start),
        "-to".to_string(),
        format!("{}", region.end),
    ];

    let video_filters = video_filters_for(request.output_height, request.speed);
    if !video_filters.is_empty() {
        args.push("-vf".to_string());
        args.push(video_filters.join(","));
    }

    let audio_filters = atempo_filters_for_speed(request.speed);
    if !audio_filters.is_empty() {
        args.push("-af".to_string());
        args.push(audio_filters.join(","));
    }

    args.extend([
        "-c:v".to_string(),
        request.video_codec.clone(),
        "-preset".to_string(),
        request.preset.clone(),
        "-crf".to_string(),
        request.crf.to_string(),
        "-c:a".to_string(),
        request.audio_codec.clone(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        segment_path.to_string_lossy().into_owned(),
    ]);

    args
}

/// Export every region of the request into the workspace, in input order.
///
/// Returns the segment paths in output order. A failed invocation stops
/// the loop immediately; later regions are never attempted.
pub fn export_segments(
    request: &ExportRequest,
    workspace: &SegmentWorkspace,
    runner: &dyn CommandRunner,
) -> CoreResult<Vec<PathBuf>> {
    let mut segment_paths = Vec::with_capacity(request.regions.len());

    for (index, region) in request.regions.iter().enumerate() {
        let segment_path = workspace.segment_path(index);
        info!(
            "Stage: {} ({:.2}s - {:.2}s, {:.2}s of source)",
            ExportStage::ExportingSegment(index),
            region.start,
            region.end,
            region.duration()
        );

        let args = build_segment_args(request, region, &segment_path);
        runner
            .run(FFMPEG, &args)
            .map_err(|e| CoreError::SegmentExport {
                index,
                source: Box::new(e),
            })?;

        segment_paths.push(segment_path);
    }

    Ok(segment_paths)
}
