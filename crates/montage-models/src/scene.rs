//! Scene models.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::time::format_time;

/// Scene classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SceneType {
    Action,
    Dialogue,
    Closeup,
    Wide,
    Transition,
    Highlight,
    #[default]
    #[serde(other)]
    Establishing,
}

impl SceneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneType::Action => "action",
            SceneType::Dialogue => "dialogue",
            SceneType::Establishing => "establishing",
            SceneType::Closeup => "closeup",
            SceneType::Wide => "wide",
            SceneType::Transition => "transition",
            SceneType::Highlight => "highlight",
        }
    }
}

impl fmt::Display for SceneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emotional tone of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Energetic,
    Dramatic,
    Funny,
    Serious,
    Romantic,
    #[default]
    #[serde(other)]
    Calm,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Energetic => "energetic",
            Mood::Calm => "calm",
            Mood::Dramatic => "dramatic",
            Mood::Funny => "funny",
            Mood::Serious => "serious",
            Mood::Romantic => "romantic",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Amount of on-screen motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MotionLevel {
    Low,
    High,
    #[default]
    #[serde(other)]
    Medium,
}

/// Camera framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    Closeup,
    Wide,
    ExtremeWide,
    #[default]
    #[serde(other)]
    Medium,
}

/// A labeled time interval of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Scene identifier (unique within one analysis result)
    pub id: String,

    /// Start offset in seconds
    pub start_time: f64,

    /// End offset in seconds (never before `start_time`)
    pub end_time: f64,

    pub description: String,

    /// Detection confidence in `0.0..=1.0`
    pub confidence: f64,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(rename = "type", default)]
    pub scene_type: SceneType,

    #[serde(default)]
    pub mood: Mood,

    /// Hex colors, most dominant first
    #[serde(default)]
    pub dominant_colors: Vec<String>,

    #[serde(default)]
    pub motion_level: MotionLevel,

    #[serde(default)]
    pub shot_type: ShotType,
}

impl Scene {
    /// Create a scene with default classification.
    pub fn new(
        id: impl Into<String>,
        start_time: f64,
        end_time: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            description: description.into(),
            confidence: 0.8,
            tags: Vec::new(),
            scene_type: SceneType::default(),
            mood: Mood::default(),
            dominant_colors: Vec::new(),
            motion_level: MotionLevel::default(),
            shot_type: ShotType::default(),
        }
    }

    pub fn with_classification(mut self, scene_type: SceneType, mood: Mood) -> Self {
        self.scene_type = scene_type;
        self.mood = mood;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Enforce `end_time >= start_time` and keep confidence in range.
    pub fn normalized(mut self) -> Self {
        if self.end_time < self.start_time {
            self.end_time = self.start_time;
        }
        self.confidence = self.confidence.clamp(0.0, 1.0);
        self
    }

    /// Length of the scene in seconds.
    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }

    /// True when the two scenes share any instant (touching bounds do not count).
    pub fn overlaps(&self, other: &Scene) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    /// Human-readable range, e.g. `00:00:30.00 - 00:01:00.00`.
    pub fn time_range_label(&self) -> String {
        format!("{} - {}", format_time(self.start_time), format_time(self.end_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_serializes_with_wire_names() {
        let scene = Scene::new("s1", 0.0, 5.0, "Intro")
            .with_classification(SceneType::Closeup, Mood::Funny);
        let json = serde_json::to_value(&scene).unwrap();

        assert_eq!(json["startTime"], 0.0);
        assert_eq!(json["endTime"], 5.0);
        assert_eq!(json["type"], "closeup");
        assert_eq!(json["mood"], "funny");
        assert_eq!(json["motionLevel"], "medium");
        assert_eq!(json["shotType"], "medium");
        assert!(json["dominantColors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_enum_values_fall_back_to_defaults() {
        let scene: Scene = serde_json::from_str(
            r#"{
                "id": "x",
                "startTime": 1,
                "endTime": 2,
                "description": "d",
                "confidence": 0.5,
                "type": "montage",
                "mood": "melancholy",
                "motionLevel": "frantic",
                "shotType": "extreme_wide"
            }"#,
        )
        .unwrap();

        assert_eq!(scene.scene_type, SceneType::Establishing);
        assert_eq!(scene.mood, Mood::Calm);
        assert_eq!(scene.motion_level, MotionLevel::Medium);
        assert_eq!(scene.shot_type, ShotType::ExtremeWide);
        assert!(scene.tags.is_empty());
    }

    #[test]
    fn test_normalized_enforces_time_order() {
        let scene = Scene::new("s", 10.0, 4.0, "bad").with_confidence(1.7).normalized();
        assert_eq!(scene.end_time, 10.0);
        assert_eq!(scene.duration(), 0.0);
        assert_eq!(scene.confidence, 1.0);
    }

    #[test]
    fn test_overlaps() {
        let a = Scene::new("a", 0.0, 10.0, "");
        let b = Scene::new("b", 10.0, 20.0, "");
        let c = Scene::new("c", 5.0, 15.0, "");
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_time_range_label() {
        let scene = Scene::new("s", 30.0, 90.0, "");
        assert_eq!(scene.time_range_label(), "00:00:30.00 - 00:01:30.00");
    }
}
