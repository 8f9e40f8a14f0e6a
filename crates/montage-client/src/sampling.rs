//! Frame sampling plan for direct vision analysis.

/// Upper bound on frames sent for one video.
pub const MAX_SAMPLED_FRAMES: usize = 10;

/// Minimum spacing, in seconds, that earns one more frame.
pub const SECONDS_PER_FRAME: f64 = 3.0;

/// Time positions (seconds) at which the host should extract frames.
///
/// `min(10, floor(duration / 3))` evenly spaced positions starting at 0.
pub fn frame_sample_times(duration: f64) -> Vec<f64> {
    if !duration.is_finite() || duration <= 0.0 {
        return Vec::new();
    }

    let count = ((duration / SECONDS_PER_FRAME).floor() as usize).min(MAX_SAMPLED_FRAMES);
    if count == 0 {
        return Vec::new();
    }

    let interval = duration / count as f64;
    (0..count).map(|i| i as f64 * interval).collect()
}
