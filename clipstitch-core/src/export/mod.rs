//! The region-export pipeline.
//!
//! Control flow per request: validate the region list, create a unique
//! segment workspace next to the output, re-encode every region into its
//! own segment file (strictly sequential, one ffmpeg process at a time),
//! then losslessly join the segments with the concat demuxer. Every
//! failure aborts the whole request; nothing is retried and no partial
//! output is promoted.

use log::{debug, info};
use std::fmt;
use std::path::PathBuf;

use crate::config::ExportRequest;
use crate::error::CoreResult;
use crate::external::CommandRunner;
use crate::workspace::SegmentWorkspace;

pub mod concat;
pub mod segments;

/// Progression of one export request through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Validating,
    ExportingSegment(usize),
    Concatenating,
    Done,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStage::Validating => write!(f, "validating regions"),
            ExportStage::ExportingSegment(i) => write!(f, "exporting segment {i}"),
            ExportStage::Concatenating => write!(f, "concatenating segments"),
            ExportStage::Done => write!(f, "done"),
        }
    }
}

/// Run one export request to completion and return the output path.
///
/// This is the crate's entry point: callers construct an
/// [`ExportRequest`], pick a runner (the real
/// [`ExecCommandRunner`](crate::ExecCommandRunner) or a mock), and get
/// back either the final output path or the first error encountered.
/// Concurrent requests are safe as long as they target distinct output
/// files; each gets an isolated workspace.
pub fn export_regions(
    request: &ExportRequest,
    runner: &dyn CommandRunner,
) -> CoreResult<PathBuf> {
    debug!("Stage: {}", ExportStage::Validating);
    request.validate()?;

    let workspace = SegmentWorkspace::create(&request.output, request.keep_temp_files)?;
    info!(
        "Exporting {} region(s) from {} to {}",
        request.regions.len(),
        request.input.display(),
        request.output.display()
    );

    let segment_paths = segments::export_segments(request, &workspace, runner)?;

    debug!("Stage: {}", ExportStage::Concatenating);
    concat::concat_segments(&segment_paths, &workspace, request, runner)?;

    debug!("Stage: {}", ExportStage::Done);
    info!("Export finished: {}", request.output.display());
    Ok(request.output.clone())
}
