//! Video analysis result models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::caption::Caption;
use crate::scene::Scene;

/// Frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Video-level metadata attached to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisMetadata {
    /// Duration in seconds
    pub duration: f64,
    pub resolution: Resolution,
    pub fps: f64,
}

impl AnalysisMetadata {
    /// Metadata with the default resolution and frame rate.
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            ..Default::default()
        }
    }
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            duration: 0.0,
            resolution: Resolution::default(),
            fps: 30.0,
        }
    }
}

/// Normalized output of a video analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoAnalysisResult {
    pub scenes: Vec<Scene>,
    pub captions: Vec<Caption>,
    pub metadata: AnalysisMetadata,
}

impl VideoAnalysisResult {
    pub fn new(scenes: Vec<Scene>, captions: Vec<Caption>, metadata: AnalysisMetadata) -> Self {
        Self {
            scenes,
            captions,
            metadata,
        }
    }

    /// Scene covering `time`, if any.
    pub fn scene_at(&self, time: f64) -> Option<&Scene> {
        self.scenes
            .iter()
            .find(|s| time >= s.start_time && time < s.end_time)
    }

    /// Captions active at `time`.
    pub fn captions_at(&self, time: f64) -> impl Iterator<Item = &Caption> {
        self.captions.iter().filter(move |c| c.is_active_at(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults() {
        let meta = AnalysisMetadata::with_duration(42.0);
        assert_eq!(meta.duration, 42.0);
        assert_eq!(meta.resolution, Resolution { width: 1920, height: 1080 });
        assert_eq!(meta.fps, 30.0);
        assert_eq!(AnalysisMetadata::with_duration(-3.0).duration, 0.0);
    }

    #[test]
    fn test_scene_and_caption_lookup() {
        let result = VideoAnalysisResult::new(
            vec![Scene::new("a", 0.0, 10.0, "a"), Scene::new("b", 10.0, 20.0, "b")],
            vec![Caption::new("1", "hello", 2.0, 4.0, 0.9)],
            AnalysisMetadata::with_duration(20.0),
        );

        assert_eq!(result.scene_at(10.0).map(|s| s.id.as_str()), Some("b"));
        assert!(result.scene_at(25.0).is_none());
        assert_eq!(result.captions_at(3.0).count(), 1);
        assert_eq!(result.captions_at(5.0).count(), 0);
    }
}
