//! Deterministic placeholder analysis.
//!
//! Substituted whenever real analysis is unavailable, so the panel always
//! has something structurally valid to show.

use montage_models::{
    AnalysisMetadata, Caption, Mood, MotionLevel, Scene, SceneType, ShotType,
    VideoAnalysisResult,
};

/// Duration assumed for fallback results.
pub const FALLBACK_DURATION_SECS: f64 = 120.0;

const FALLBACK_CONFIDENCE: f64 = 0.7;

struct SceneTemplate {
    description: &'static str,
    tags: [&'static str; 3],
    scene_type: SceneType,
    mood: Mood,
    colors: [&'static str; 3],
    motion_level: MotionLevel,
    shot_type: ShotType,
}

const SCENE_TEMPLATES: [SceneTemplate; 4] = [
    SceneTemplate {
        description: "Opening scene - establishing shot",
        tags: ["establishing", "intro", "fallback"],
        scene_type: SceneType::Establishing,
        mood: Mood::Calm,
        colors: ["#000000", "#ffffff", "#cccccc"],
        motion_level: MotionLevel::Low,
        shot_type: ShotType::Wide,
    },
    SceneTemplate {
        description: "Main action sequence",
        tags: ["action", "dynamic", "fallback"],
        scene_type: SceneType::Action,
        mood: Mood::Energetic,
        colors: ["#ff0000", "#ffff00", "#00ff00"],
        motion_level: MotionLevel::High,
        shot_type: ShotType::Medium,
    },
    SceneTemplate {
        description: "Dialogue scene",
        tags: ["dialogue", "conversation", "fallback"],
        scene_type: SceneType::Dialogue,
        mood: Mood::Serious,
        colors: ["#0000ff", "#ffffff", "#cccccc"],
        motion_level: MotionLevel::Low,
        shot_type: ShotType::Closeup,
    },
    SceneTemplate {
        description: "Closing sequence",
        tags: ["highlight", "climax", "fallback"],
        scene_type: SceneType::Highlight,
        mood: Mood::Dramatic,
        colors: ["#ff00ff", "#ffff00", "#00ffff"],
        motion_level: MotionLevel::Medium,
        shot_type: ShotType::Wide,
    },
];

const CAPTION_TEMPLATES: [(&str, f64, f64); 4] = [
    ("Welcome to our tutorial (fallback)", 0.0, 3.0),
    ("Today we will learn about video editing (fallback)", 3.0, 7.0),
    ("Let us start with the basics (fallback)", 7.0, 12.0),
    ("This is an important technique (fallback)", 12.0, 18.0),
];

/// Four contiguous scenes of equal length covering `0..duration`.
pub fn fallback_scenes(duration: f64) -> Vec<Scene> {
    let duration = if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        FALLBACK_DURATION_SECS
    };
    let count = SCENE_TEMPLATES.len();
    let slice = duration / count as f64;

    SCENE_TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, t)| {
            // The last bound is pinned so rounding never leaves a gap at the end.
            let end_time = if i + 1 == count { duration } else { slice * (i + 1) as f64 };
            Scene {
                id: format!("fallback_{}", i + 1),
                start_time: slice * i as f64,
                end_time,
                description: t.description.to_string(),
                confidence: FALLBACK_CONFIDENCE,
                tags: t.tags.iter().map(|s| s.to_string()).collect(),
                scene_type: t.scene_type,
                mood: t.mood,
                dominant_colors: t.colors.iter().map(|s| s.to_string()).collect(),
                motion_level: t.motion_level,
                shot_type: t.shot_type,
            }
        })
        .collect()
}

/// Placeholder for a single frame whose analysis could not be read.
pub fn fallback_scene(time_position: f64, total_duration: f64) -> Scene {
    Scene {
        id: format!("fallback_scene_{}", time_position),
        start_time: time_position,
        end_time: time_position + total_duration.max(0.0) / 10.0,
        description: "Scene detected (fallback analysis)".to_string(),
        confidence: FALLBACK_CONFIDENCE,
        tags: vec!["fallback".to_string(), "auto-detected".to_string()],
        scene_type: SceneType::Establishing,
        mood: Mood::Calm,
        dominant_colors: vec!["#000000".to_string(), "#ffffff".to_string()],
        motion_level: MotionLevel::Medium,
        shot_type: ShotType::Medium,
    }
}

pub fn fallback_captions() -> Vec<Caption> {
    CAPTION_TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, (text, start, end))| {
            Caption::new(
                format!("fallback_caption_{}", i + 1),
                *text,
                *start,
                *end,
                FALLBACK_CONFIDENCE,
            )
        })
        .collect()
}

/// Whole-call placeholder result.
pub fn fallback_analysis() -> VideoAnalysisResult {
    VideoAnalysisResult::new(
        fallback_scenes(FALLBACK_DURATION_SECS),
        fallback_captions(),
        AnalysisMetadata::with_duration(FALLBACK_DURATION_SECS),
    )
}
