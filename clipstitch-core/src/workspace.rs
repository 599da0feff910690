//! Per-request segment workspace management.
//!
//! Every export request gets its own uniquely named directory next to the
//! output file, created through the tempfile crate so concurrent requests
//! targeting the same output directory never collide. Retention is an
//! explicit policy: by default the workspace (segments and concat
//! manifest included) is removed when the workspace is dropped, whether
//! the export succeeded or failed; with `keep_temp_files` the directory
//! is persisted and its path logged for inspection.

use log::info;
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, TempDir};

use crate::error::CoreResult;

/// Prefix of every workspace directory name.
const WORKSPACE_PREFIX: &str = "clipstitch_segments_";

/// A uniquely named scratch directory holding the intermediate segment
/// files and the concat manifest for one export request.
#[derive(Debug)]
pub struct SegmentWorkspace {
    dir: PathBuf,
    // Present while the workspace is temporary; dropping it removes the
    // directory. None once the workspace has been persisted.
    temp: Option<TempDir>,
}

impl SegmentWorkspace {
    /// Create a workspace adjacent to the intended output file.
    ///
    /// The output's parent directory is created if missing. With `keep`
    /// the directory survives the export and its path is logged;
    /// otherwise it is removed when the workspace goes out of scope.
    pub fn create(output: &Path, keep: bool) -> CoreResult<Self> {
        let parent = match output.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let temp = TempFileBuilder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(&parent)?;

        if keep {
            let dir = temp.keep();
            info!("Keeping segment workspace at {}", dir.display());
            Ok(Self { dir, temp: None })
        } else {
            Ok(Self {
                dir: temp.path().to_path_buf(),
                temp: Some(temp),
            })
        }
    }

    /// Directory holding the segments and manifest.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Path of the segment file for the region at `index` (`seg_000.mp4`,
    /// `seg_001.mp4`, ...).
    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("seg_{index:03}.mp4"))
    }

    /// Path of the concat demuxer manifest inside the workspace.
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join("concat.txt")
    }

    /// Whether the workspace survives beyond this handle.
    pub fn is_persistent(&self) -> bool {
        self.temp.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_names_are_unique_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp4");

        let a = SegmentWorkspace::create(&output, false).unwrap();
        let b = SegmentWorkspace::create(&output, false).unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().exists());
        assert!(b.path().exists());
    }

    #[test]
    fn test_temporary_workspace_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp4");

        let workspace = SegmentWorkspace::create(&output, false).unwrap();
        let path = workspace.path().to_path_buf();
        assert!(path.exists());
        assert!(!workspace.is_persistent());

        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn test_kept_workspace_survives_drop() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp4");

        let workspace = SegmentWorkspace::create(&output, true).unwrap();
        let path = workspace.path().to_path_buf();
        assert!(workspace.is_persistent());

        drop(workspace);
        assert!(path.exists());
    }

    #[test]
    fn test_segment_and_manifest_paths() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp4");
        let workspace = SegmentWorkspace::create(&output, false).unwrap();

        assert_eq!(
            workspace.segment_path(0).file_name().unwrap(),
            "seg_000.mp4"
        );
        assert_eq!(
            workspace.segment_path(42).file_name().unwrap(),
            "seg_042.mp4"
        );
        assert_eq!(workspace.manifest_path().file_name().unwrap(), "concat.txt");
    }

    #[test]
    fn test_missing_output_parent_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("deeper").join("out.mp4");

        let workspace = SegmentWorkspace::create(&output, false).unwrap();
        assert!(workspace.path().starts_with(dir.path().join("nested/deeper")));
    }
}
