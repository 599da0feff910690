//! Region descriptors and pre-flight validation.
//!
//! Regions are caller-supplied time intervals of the source media, in the
//! order they should appear in the output. A region list may deliberately
//! reorder or repeat source footage. Validation runs before any ffmpeg
//! process is spawned so invalid input never leaves partial segments on
//! disk.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A time interval of the source media, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Start of the interval (seconds from the start of the source)
    #[serde(alias = "startSec")]
    pub start: f64,

    /// End of the interval, exclusive of further footage (seconds)
    #[serde(alias = "endSec")]
    pub end: f64,
}

impl Region {
    /// Length of the region in source seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Validate an ordered region list before any subprocess is launched.
///
/// Fails on an empty list, and for each region on non-finite bounds, a
/// negative start, or `end <= start`. The first offending region is
/// reported with its index so callers can point at the bad entry.
pub fn validate_regions(regions: &[Region]) -> CoreResult<()> {
    if regions.is_empty() {
        return Err(CoreError::NoRegions);
    }

    for (index, region) in regions.iter().enumerate() {
        if !region.start.is_finite() || !region.end.is_finite() {
            return Err(CoreError::InvalidRegion {
                index,
                detail: format!(
                    "bounds must be finite numbers, got start={}, end={}",
                    region.start, region.end
                ),
            });
        }

        if region.start < 0.0 {
            return Err(CoreError::InvalidRegion {
                index,
                detail: format!("start must not be negative, got {}", region.start),
            });
        }

        if region.end <= region.start {
            return Err(CoreError::InvalidRegion {
                index,
                detail: format!(
                    "end ({}) must be greater than start ({})",
                    region.end, region.start
                ),
            });
        }
    }

    Ok(())
}
