//! Core library for region-based video trimming and concatenation using ffmpeg.
//!
//! This crate takes a local video file and an ordered list of time-range
//! regions, re-encodes each region into a self-contained segment (with
//! optional speed adjustment and rescaling), and losslessly joins the
//! segments with ffmpeg's concat demuxer into a single output file.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use clipstitch_core::{export_regions, ExecCommandRunner, ExportRequest, Region};
//!
//! let request = ExportRequest::new(
//!     "/path/to/input.mp4",
//!     vec![
//!         Region { start: 0.0, end: 2.0 },
//!         Region { start: 10.0, end: 12.0 },
//!     ],
//!     "/path/to/output.mp4",
//! );
//!
//! let output = export_regions(&request, &ExecCommandRunner).unwrap();
//! println!("exported {}", output.display());
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod external;
pub mod filters;
pub mod regions;
pub mod workspace;

// Re-exports for public API
pub use config::ExportRequest;
pub use error::{CoreError, CoreResult};
pub use export::{export_regions, ExportStage};
pub use external::{check_dependency, CommandRunner, ExecCommandRunner, FFMPEG};
pub use regions::{validate_regions, Region};
pub use workspace::SegmentWorkspace;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
