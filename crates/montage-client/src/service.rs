//! Never-fail analysis entry points.
//!
//! Every public method here resolves to structurally valid data. Failures
//! are logged and replaced by the smallest applicable fallback: one frame's
//! scene, the whole scene list, or the whole analysis result.

use std::path::Path;
use std::sync::Arc;

use montage_models::{AnalysisMetadata, Caption, Scene, VideoAnalysisResult};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::backend::BackendClient;
use crate::captions::captions_from_transcript;
use crate::config::AnalysisConfig;
use crate::error::ClientError;
use crate::fallback::{fallback_analysis, fallback_scene, fallback_scenes};
use crate::merge::merge_similar_scenes;
use crate::openai::OpenAiClient;
use crate::upload::{FrameSample, VideoUpload};

/// Which third-party credentials are configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiAvailability {
    pub openai: bool,
    pub google: bool,
    pub azure: bool,
    pub aws: bool,
}

/// Video analysis service.
#[derive(Clone)]
pub struct AnalysisService {
    config: Arc<AnalysisConfig>,
    backend: Option<BackendClient>,
    vision: Option<OpenAiClient>,
}

impl AnalysisService {
    /// Create a service. Unusable settings disable the affected client
    /// instead of failing.
    pub fn new(config: AnalysisConfig) -> Self {
        let backend = match BackendClient::new(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                error!("Backend client disabled: {}", e);
                None
            }
        };

        let vision = match OpenAiClient::new(&config.openai) {
            Ok(client) => Some(client),
            Err(ClientError::MissingCredential(name)) => {
                info!("{} not set - direct vision/transcription disabled", name);
                None
            }
            Err(e) => {
                error!("Vision client disabled: {}", e);
                None
            }
        };

        Self {
            config: Arc::new(config),
            backend,
            vision,
        }
    }

    /// Create from environment variables (loads `.env` when present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let config = AnalysisConfig::from_env();
        info!("Analysis config: {:?}", config);
        Self::new(config)
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a video through the backend, falling back on any failure.
    pub async fn analyze_video(
        &self,
        upload: &VideoUpload,
        script_content: Option<&str>,
    ) -> VideoAnalysisResult {
        info!(
            file = %upload.file_name,
            with_script = script_content.is_some_and(|s| !s.trim().is_empty()),
            "Starting video analysis"
        );

        let Some(backend) = &self.backend else {
            warn!("No usable backend configured, using fallback analysis");
            return fallback_analysis();
        };

        match backend.analyze_video(upload, script_content).await {
            Ok(result) => {
                info!(
                    scenes = result.scenes.len(),
                    captions = result.captions.len(),
                    duration = result.metadata.duration,
                    "Video analysis completed"
                );
                result
            }
            Err(e) if e.is_transport() => {
                warn!(timeout = e.is_timeout(), "Analysis backend unreachable, using fallback analysis: {}", e);
                fallback_analysis()
            }
            Err(e) => {
                warn!("Video analysis failed, using fallback analysis: {}", e);
                fallback_analysis()
            }
        }
    }

    /// Read a video from disk and analyze it.
    pub async fn analyze_video_file(
        &self,
        path: impl AsRef<Path>,
        script_content: Option<&str>,
    ) -> VideoAnalysisResult {
        let path = path.as_ref();
        match VideoUpload::from_path(path).await {
            Ok(upload) => self.analyze_video(&upload, script_content).await,
            Err(e) => {
                warn!(path = %path.display(), "Could not read video, using fallback analysis: {}", e);
                fallback_analysis()
            }
        }
    }

    /// Classify sampled frames with the vision API and merge the results.
    pub async fn analyze_frames(&self, frames: &[FrameSample], duration: f64) -> Vec<Scene> {
        let Some(vision) = &self.vision else {
            warn!("Vision API key not configured, using fallback scene analysis");
            return fallback_scenes(duration);
        };

        if frames.is_empty() {
            warn!("No frames to analyze, using fallback scene analysis");
            return fallback_scenes(duration);
        }

        let mut scenes = Vec::with_capacity(frames.len());
        for frame in frames {
            match vision.analyze_frame(frame, duration).await {
                Ok(scene) => scenes.push(scene),
                Err(ClientError::Parse(msg)) => {
                    warn!(
                        time_position = frame.time_position,
                        "Unreadable frame analysis, using fallback scene: {}", msg
                    );
                    scenes.push(fallback_scene(frame.time_position, duration));
                }
                Err(e) => {
                    error!("Vision scene analysis failed: {}", e);
                    return fallback_scenes(duration);
                }
            }
        }

        merge_similar_scenes(scenes)
    }

    /// Transcribe the audio track into captions. Empty on any failure.
    pub async fn transcribe_captions(&self, upload: &VideoUpload, duration: f64) -> Vec<Caption> {
        let Some(vision) = &self.vision else {
            warn!("Transcription API key not configured, skipping audio analysis");
            return Vec::new();
        };

        match vision.transcribe(upload).await {
            Ok(transcription) => captions_from_transcript(&transcription.text, duration),
            Err(e) => {
                error!("Audio analysis failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Analyze directly against the vision/transcription API, bypassing the backend.
    pub async fn analyze_direct(
        &self,
        upload: &VideoUpload,
        frames: &[FrameSample],
        metadata: AnalysisMetadata,
    ) -> VideoAnalysisResult {
        info!(
            file = %upload.file_name,
            frames = frames.len(),
            duration = metadata.duration,
            "Starting direct video analysis"
        );

        let (scenes, captions) = tokio::join!(
            self.analyze_frames(frames, metadata.duration),
            self.transcribe_captions(upload, metadata.duration),
        );

        info!(
            scenes = scenes.len(),
            captions = captions.len(),
            "Direct video analysis completed"
        );
        VideoAnalysisResult::new(scenes, captions, metadata)
    }

    /// True when the backend answers its health probe.
    pub async fn backend_available(&self) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };

        match backend.health().await {
            Ok(health) => {
                info!(
                    status = %health.status,
                    ai_available = health.ai_available,
                    "Backend health: {}", health.message
                );
                health.is_healthy()
            }
            Err(e) => {
                warn!("Backend health check failed: {}", e);
                false
            }
        }
    }

    /// Report which provider credentials are present.
    pub fn api_availability(&self) -> ApiAvailability {
        let providers = &self.config.providers;
        ApiAvailability {
            openai: self.config.openai.api_key.is_some(),
            google: providers.google_cloud_api_key.is_some(),
            azure: providers.azure_api_key.is_some(),
            aws: providers.aws_access_key_id.is_some() && providers.aws_secret_access_key.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FALLBACK_DURATION_SECS;

    #[tokio::test]
    async fn test_invalid_backend_url_still_resolves() {
        let service = AnalysisService::new(AnalysisConfig::default().with_backend_url("::not a url::"));
        let upload = VideoUpload::new("clip.mp4", vec![1, 2, 3]);

        let result = service.analyze_video(&upload, None).await;
        assert_eq!(result, fallback_analysis());
        assert!(!service.backend_available().await);
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        let service = AnalysisService::new(AnalysisConfig::default());
        let upload = VideoUpload::new("clip.mp4", vec![0; 16]);

        let scenes = service
            .analyze_frames(&[FrameSample::new(0.0, vec![0xff, 0xd8])], 60.0)
            .await;
        assert_eq!(scenes, fallback_scenes(60.0));
        assert!(service.transcribe_captions(&upload, 60.0).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_resolves_to_fallback() {
        let service = AnalysisService::new(AnalysisConfig::default());
        let result = service.analyze_video_file("/no/such/video.mp4", None).await;
        assert_eq!(result.metadata.duration, FALLBACK_DURATION_SECS);
        assert_eq!(result, fallback_analysis());
    }

    #[test]
    fn test_api_availability() {
        let mut config = AnalysisConfig::default().with_openai_key("sk-test");
        config.providers.aws_access_key_id = Some("AKIA".into());
        let service = AnalysisService::new(config);

        let availability = service.api_availability();
        assert!(availability.openai);
        assert!(!availability.google);
        assert!(!availability.azure);
        assert!(!availability.aws);
    }
}
