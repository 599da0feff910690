//! Filter-chain planning for speed adjustment and rescaling.
//!
//! ffmpeg's `atempo` audio filter only accepts multipliers in [0.5, 2.0]
//! per stage, so speeds outside that range are expressed as a chain of
//! stages whose product equals the requested speed. Video playback speed
//! is changed separately by dividing presentation timestamps (`setpts`);
//! the audio chain keeps tempo in sync without shifting pitch.

/// Minimum multiplier a single atempo stage accepts.
const ATEMPO_MIN: f64 = 0.5;

/// Maximum multiplier a single atempo stage accepts.
const ATEMPO_MAX: f64 = 2.0;

/// Smallest output height ffmpeg is asked to scale to.
const MIN_OUTPUT_HEIGHT: u32 = 144;

/// Largest output height ffmpeg is asked to scale to.
const MAX_OUTPUT_HEIGHT: u32 = 1080;

/// Plan the audio tempo filter chain for a playback speed.
///
/// Returns an empty chain for speed 1. Speeds above 2 are reached by
/// chaining `atempo=2.0` stages, speeds below 0.5 by chaining
/// `atempo=0.5` stages; whatever factor remains is emitted as one final
/// stage with 4 decimal digits. The product of the emitted stages equals
/// the requested speed, and every stage stays within atempo's range.
pub fn atempo_filters_for_speed(speed: f64) -> Vec<String> {
    let mut filters = Vec::new();

    if speed == 1.0 {
        return filters;
    }

    let mut remaining = speed;

    while remaining > ATEMPO_MAX {
        filters.push("atempo=2.0".to_string());
        remaining /= ATEMPO_MAX;
    }

    while remaining < ATEMPO_MIN {
        filters.push("atempo=0.5".to_string());
        remaining /= ATEMPO_MIN;
    }

    if (remaining - 1.0).abs() > 1e-9 {
        filters.push(format!("atempo={remaining:.4}"));
    }

    filters
}

/// Clamp a requested output height into the supported [144, 1080] range.
pub fn clamp_output_height(height: u32) -> u32 {
    height.clamp(MIN_OUTPUT_HEIGHT, MAX_OUTPUT_HEIGHT)
}

/// Build the video filter chain for a segment export.
///
/// Always scales to the clamped output height with `-2` for the width so
/// the aspect ratio is preserved and the width stays even. When the speed
/// differs from 1, presentation timestamps are divided by the speed
/// factor, which is what actually changes video playback speed.
pub fn video_filters_for(output_height: u32, speed: f64) -> Vec<String> {
    let mut filters = vec![format!("scale=-2:{}", clamp_output_height(output_height))];

    if speed != 1.0 {
        filters.push(format!("setpts=PTS/{speed}"));
    }

    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_multiplier(stage: &str) -> f64 {
        stage
            .strip_prefix("atempo=")
            .expect("stage should start with atempo=")
            .parse()
            .expect("stage multiplier should parse as f64")
    }

    #[test]
    fn test_unit_speed_needs_no_filters() {
        assert!(atempo_filters_for_speed(1.0).is_empty());
    }

    #[test]
    fn test_speed_in_native_range_is_single_stage() {
        let filters = atempo_filters_for_speed(1.5);
        assert_eq!(filters, vec!["atempo=1.5000"]);
    }

    #[test]
    fn test_range_boundaries_do_not_chain() {
        assert_eq!(atempo_filters_for_speed(2.0), vec!["atempo=2.0000"]);
        assert_eq!(atempo_filters_for_speed(0.5), vec!["atempo=0.5000"]);
    }

    #[test]
    fn test_speed_4_chains_two_stages() {
        let filters = atempo_filters_for_speed(4.0);
        assert_eq!(filters.len(), 2);
        let product: f64 = filters.iter().map(|f| stage_multiplier(f)).product();
        assert!((product - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_speed_quarter_chains_two_stages() {
        let filters = atempo_filters_for_speed(0.25);
        assert_eq!(filters.len(), 2);
        let product: f64 = filters.iter().map(|f| stage_multiplier(f)).product();
        assert!((product - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_stage_product_matches_speed_and_stays_in_range() {
        let speeds = [
            0.1, 0.125, 0.25, 0.3, 0.5, 0.6, 0.75, 1.25, 1.5, 2.0, 2.5, 3.0, 4.0, 6.0, 8.0, 16.0,
        ];

        for &speed in &speeds {
            let filters = atempo_filters_for_speed(speed);
            let mut product = 1.0;
            for stage in &filters {
                let multiplier = stage_multiplier(stage);
                assert!(
                    (ATEMPO_MIN..=ATEMPO_MAX).contains(&multiplier),
                    "stage {} out of atempo range for speed {}",
                    stage,
                    speed
                );
                product *= multiplier;
            }
            assert!(
                (product - speed).abs() < 1e-3,
                "stages {:?} multiply to {} instead of {}",
                filters,
                product,
                speed
            );
        }
    }

    #[test]
    fn test_output_height_clamping() {
        assert_eq!(clamp_output_height(2000), 1080);
        assert_eq!(clamp_output_height(50), 144);
        assert_eq!(clamp_output_height(720), 720);
        assert_eq!(clamp_output_height(144), 144);
        assert_eq!(clamp_output_height(1080), 1080);
    }

    #[test]
    fn test_video_filters_at_unit_speed() {
        let filters = video_filters_for(1080, 1.0);
        assert_eq!(filters, vec!["scale=-2:1080"]);
    }

    #[test]
    fn test_video_filters_with_speed_change() {
        let filters = video_filters_for(720, 2.0);
        assert_eq!(filters, vec!["scale=-2:720", "setpts=PTS/2"]);
    }

    #[test]
    fn test_video_filters_with_fractional_speed() {
        let filters = video_filters_for(480, 0.5);
        assert_eq!(filters, vec!["scale=-2:480", "setpts=PTS/0.5"]);
    }
}
