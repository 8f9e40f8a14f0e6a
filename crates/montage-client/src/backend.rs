//! Client for the video analysis backend.
//!
//! The backend is a black box behind two endpoints:
//! - `POST /analyze-video` (multipart `file` + optional `script_content`)
//! - `GET /health`

use std::time::Duration;

use montage_models::{
    AnalysisMetadata, Caption, Mood, MotionLevel, Scene, SceneType, ShotType,
    VideoAnalysisResult,
};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::config::AnalysisConfig;
use crate::error::{ClientError, ClientResult};
use crate::upload::VideoUpload;

/// Confidence assigned to backend scenes that omit one.
const DEFAULT_SCENE_CONFIDENCE: f64 = 0.8;

/// Confidence of the single caption built from a backend transcript.
const TRANSCRIPT_CAPTION_CONFIDENCE: f64 = 0.9;

/// `POST /analyze-video` response envelope.
#[derive(Debug, Deserialize)]
struct AnalyzeVideoResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    scenes: Option<Vec<BackendScene>>,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    metadata: Option<BackendMetadata>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BackendMetadata {
    #[serde(default, deserialize_with = "montage_models::time::seconds::deserialize")]
    duration: f64,
}

/// Scene as produced by the backend. Only `startTime`/`endTime` are
/// strictly needed; everything else has a default.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendScene {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "montage_models::time::seconds::deserialize")]
    start_time: f64,
    #[serde(default, deserialize_with = "montage_models::time::seconds::deserialize")]
    end_time: f64,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(rename = "type", default)]
    scene_type: Option<SceneType>,
    #[serde(default)]
    mood: Option<Mood>,
    #[serde(default)]
    dominant_colors: Option<Vec<String>>,
    #[serde(default)]
    motion_level: Option<MotionLevel>,
    #[serde(default)]
    shot_type: Option<ShotType>,
}

impl BackendScene {
    fn into_scene(self, index: usize) -> Scene {
        let id = match self.id {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => format!("scene_{}", index + 1),
        };

        Scene {
            id,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description.unwrap_or_default(),
            confidence: self.confidence.unwrap_or(DEFAULT_SCENE_CONFIDENCE),
            tags: self.tags.unwrap_or_default(),
            scene_type: self.scene_type.unwrap_or_default(),
            mood: self.mood.unwrap_or_default(),
            dominant_colors: self.dominant_colors.unwrap_or_default(),
            motion_level: self.motion_level.unwrap_or_default(),
            shot_type: self.shot_type.unwrap_or_default(),
        }
        .normalized()
    }
}

/// Backend health report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub ai_available: bool,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Analysis backend client.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    analyze_timeout: Duration,
    health_timeout: Duration,
}

impl BackendClient {
    /// Create a new backend client.
    pub fn new(config: &AnalysisConfig) -> ClientResult<Self> {
        let base_url = parse_base_url(&config.backend_url)?;
        let client = Client::builder()
            .user_agent(concat!("montage-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            analyze_timeout: config.analyze_timeout,
            health_timeout: config.health_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::config_error(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Upload a video for scene analysis.
    pub async fn analyze_video(
        &self,
        upload: &VideoUpload,
        script_content: Option<&str>,
    ) -> ClientResult<VideoAnalysisResult> {
        let url = self.endpoint("analyze-video")?;

        let file_part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.mime_type())?;
        let mut form = Form::new().part("file", file_part);

        if let Some(script) = script_content.filter(|s| !s.trim().is_empty()) {
            debug!(chars = script.len(), "Attaching script content to analysis request");
            form = form.text("script_content", script.to_string());
        }

        info!(
            file = %upload.file_name,
            bytes = upload.len(),
            url = %url,
            "Uploading video for analysis"
        );

        let response = self
            .client
            .post(url)
            .multipart(form)
            .timeout(self.analyze_timeout)
            .send()
            .await?;

        let envelope: AnalyzeVideoResponse = read_json(response).await?;
        convert_response(envelope)
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let url = self.endpoint("health")?;
        let response = self
            .client
            .get(url)
            .timeout(self.health_timeout)
            .send()
            .await?;

        read_json(response).await
    }
}

fn parse_base_url(raw: &str) -> ClientResult<Url> {
    // `Url::join` replaces the last path segment unless the base ends in '/'
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    let url = Url::parse(&normalized)
        .map_err(|e| ClientError::config_error(format!("Invalid backend URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::config_error(format!(
            "Unsupported backend URL scheme: {}",
            other
        ))),
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::parse(e.to_string()))
}

fn convert_response(envelope: AnalyzeVideoResponse) -> ClientResult<VideoAnalysisResult> {
    if !envelope.success {
        return Err(ClientError::backend(
            envelope.error.unwrap_or_else(|| "Analysis failed".to_string()),
        ));
    }

    let scenes = envelope
        .scenes
        .ok_or_else(|| ClientError::parse("Response is missing scenes"))?;

    let duration = envelope.metadata.unwrap_or_default().duration;
    let scenes: Vec<Scene> = scenes
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.into_scene(i))
        .collect();

    let captions = match envelope.transcript {
        Some(text) if !text.trim().is_empty() => vec![Caption::new(
            "1",
            text,
            0.0,
            duration,
            TRANSCRIPT_CAPTION_CONFIDENCE,
        )],
        _ => Vec::new(),
    };

    info!(
        scenes = scenes.len(),
        captions = captions.len(),
        duration,
        "Backend analysis completed"
    );

    Ok(VideoAnalysisResult::new(
        scenes,
        captions,
        AnalysisMetadata::with_duration(duration),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> AnalyzeVideoResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let url = parse_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(url.join("analyze-video").unwrap().as_str(), "http://localhost:8000/api/analyze-video");

        let url = parse_base_url("http://localhost:8000").unwrap();
        assert_eq!(url.join("health").unwrap().as_str(), "http://localhost:8000/health");
    }

    #[test]
    fn test_base_url_rejects_bad_input() {
        assert!(matches!(parse_base_url("not a url"), Err(ClientError::Config(_))));
        assert!(matches!(parse_base_url("ftp://host"), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_convert_applies_defaults() {
        let result = convert_response(envelope(
            r#"{
                "success": true,
                "scenes": [
                    {"id": "scene_1", "startTime": 0, "endTime": 15, "description": "Intro",
                     "confidence": 0.9, "tags": ["intro"], "type": "establishing", "mood": "calm"},
                    {"startTime": "00:00:15", "endTime": 30, "type": "action", "mood": "energetic",
                     "narrative_order": 2}
                ],
                "transcript": "hello world",
                "metadata": {"frame_count": 900, "duration": 30}
            }"#,
        ))
        .unwrap();

        assert_eq!(result.scenes.len(), 2);
        let second = &result.scenes[1];
        assert_eq!(second.id, "scene_2");
        assert_eq!(second.start_time, 15.0);
        assert_eq!(second.confidence, 0.8);
        assert!(second.dominant_colors.is_empty());
        assert_eq!(second.motion_level, MotionLevel::Medium);
        assert_eq!(second.shot_type, ShotType::Medium);

        assert_eq!(result.captions.len(), 1);
        assert_eq!(result.captions[0].id, "1");
        assert_eq!(result.captions[0].end_time, 30.0);
        assert_eq!(result.captions[0].confidence, 0.9);
        assert_eq!(result.metadata.duration, 30.0);
        assert_eq!(result.metadata.fps, 30.0);
    }

    #[test]
    fn test_convert_without_transcript_or_metadata() {
        let result = convert_response(envelope(r#"{"success": true, "scenes": []}"#)).unwrap();
        assert!(result.scenes.is_empty());
        assert!(result.captions.is_empty());
        assert_eq!(result.metadata.duration, 0.0);
    }

    #[test]
    fn test_null_fields_keep_the_analysis() {
        let result = convert_response(envelope(
            r#"{"success": true, "scenes": [
                {"id": "a", "startTime": 0, "endTime": 5, "description": null, "tags": null,
                 "confidence": null, "dominantColors": null, "type": null, "mood": null,
                 "motionLevel": null}
            ], "metadata": {"duration": 5}}"#,
        ))
        .unwrap();

        let scene = &result.scenes[0];
        assert_eq!(scene.id, "a");
        assert!(scene.description.is_empty());
        assert!(scene.tags.is_empty());
        assert_eq!(scene.confidence, 0.8);
        assert_eq!(scene.scene_type, SceneType::Establishing);
        assert_eq!(scene.mood, Mood::Calm);
        assert_eq!(scene.motion_level, MotionLevel::Medium);
    }

    #[test]
    fn test_convert_failure_flag() {
        let err = convert_response(envelope(r#"{"success": false, "error": "ffmpeg missing"}"#))
            .unwrap_err();
        assert!(matches!(err, ClientError::Backend(ref m) if m == "ffmpeg missing"));
    }

    #[test]
    fn test_convert_success_without_scenes_is_malformed() {
        let err = convert_response(envelope(r#"{"success": true}"#)).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn test_reversed_scene_bounds_are_normalized() {
        let result = convert_response(envelope(
            r#"{"success": true, "scenes": [{"id": 7, "startTime": 20, "endTime": 10}],
                "metadata": {"duration": 20}}"#,
        ))
        .unwrap();
        assert_eq!(result.scenes[0].id, "7");
        assert_eq!(result.scenes[0].end_time, 20.0);
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus = serde_json::from_str(
            r#"{"status": "healthy", "ai_available": true, "message": "ok"}"#,
        )
        .unwrap();
        assert!(health.is_healthy());
        assert!(health.ai_available);
    }
}
