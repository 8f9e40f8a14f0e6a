//! Shared data models for the Montage AI editor.
//!
//! This crate provides Serde-serializable types for:
//! - Scenes and their classification enums
//! - Timed captions
//! - Whole-video analysis results
//! - Time value parsing for loosely typed backend payloads

pub mod analysis;
pub mod caption;
pub mod scene;
pub mod time;

// Re-export common types
pub use analysis::{AnalysisMetadata, Resolution, VideoAnalysisResult};
pub use caption::Caption;
pub use scene::{Mood, MotionLevel, Scene, SceneType, ShotType};
pub use time::{format_time, parse_time, TimeError};
