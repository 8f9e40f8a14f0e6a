//! Video analysis client for the Montage AI editor panel.
//!
//! This crate provides:
//! - Backend client for `POST /analyze-video` and `GET /health`
//! - Optional direct vision/transcription calls, gated on credentials
//! - Scene merging and transcript chunking heuristics
//! - A deterministic fallback dataset
//! - `AnalysisService`, whose entry points never return errors

pub mod backend;
pub mod captions;
pub mod config;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod merge;
pub mod openai;
pub mod sampling;
pub mod service;
pub mod upload;

pub use backend::{BackendClient, HealthStatus};
pub use config::{AnalysisConfig, OpenAiConfig, ProviderCredentials};
pub use error::{ClientError, ClientResult};
pub use fallback::{fallback_analysis, fallback_captions, fallback_scene, fallback_scenes};
pub use logging::init_tracing;
pub use merge::{merge_similar_scenes, tag_similarity};
pub use openai::{OpenAiClient, Transcription};
pub use sampling::frame_sample_times;
pub use service::{AnalysisService, ApiAvailability};
pub use upload::{FrameSample, VideoUpload};
