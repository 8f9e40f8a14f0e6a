//! Direct vision and transcription calls against an OpenAI-compatible API.
//!
//! Only used when an API key is configured. Every call returns a
//! `ClientResult`; the service layer decides which fallback applies.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use montage_models::{Mood, MotionLevel, Scene, SceneType, ShotType};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::OpenAiConfig;
use crate::error::{ClientError, ClientResult};
use crate::upload::{FrameSample, VideoUpload};

/// Each frame-derived scene covers this fraction of the video.
const FRAME_SCENE_FRACTION: f64 = 10.0;

const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Chat completions request.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

/// Chat completions response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// JSON the vision model is asked to reply with.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrameAnalysis {
    description: Option<String>,
    scene_type: Option<SceneType>,
    mood: Option<Mood>,
    shot_type: Option<ShotType>,
    motion_level: Option<MotionLevel>,
    dominant_colors: Option<Vec<String>>,
    tags: Option<Vec<String>>,
    confidence: Option<f64>,
}

/// Transcription response.
#[derive(Debug, Clone, Deserialize)]
pub struct Transcription {
    #[serde(default)]
    pub text: String,
}

/// Vision + transcription client.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    vision_model: String,
    vision_timeout: Duration,
    transcribe_timeout: Duration,
}

impl OpenAiClient {
    /// Create a client, failing when no API key is configured.
    pub fn new(config: &OpenAiConfig) -> ClientResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(ClientError::MissingCredential("OPENAI_API_KEY"))?;

        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vision_model: config.vision_model.clone(),
            vision_timeout: config.vision_timeout,
            transcribe_timeout: config.transcribe_timeout,
        })
    }

    /// Classify a single frame into a scene starting at its time position.
    pub async fn analyze_frame(&self, frame: &FrameSample, total_duration: f64) -> ClientResult<Scene> {
        let url = format!("{}/chat/completions", self.base_url);
        let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(&frame.jpeg));

        let request = ChatRequest {
            model: self.vision_model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: build_frame_prompt(frame.time_position, total_duration),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            max_tokens: 500,
        };

        debug!(
            time_position = frame.time_position,
            model = %self.vision_model,
            "Requesting frame analysis"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(self.vision_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::parse(format!("Failed to parse chat response: {}", e)))?;

        let content = chat
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| ClientError::parse("No content in chat response"))?;

        let analysis = parse_frame_analysis(content)?;
        Ok(scene_from_analysis(analysis, frame.time_position, total_duration))
    }

    /// Transcribe the audio track of a video.
    pub async fn transcribe(&self, upload: &VideoUpload) -> ClientResult<Transcription> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = Part::bytes(upload.bytes.clone())
            .file_name("audio.mp4")
            .mime_str("audio/mp4")?;
        let form = Form::new()
            .part("file", file_part)
            .text("model", TRANSCRIPTION_MODEL);

        info!(file = %upload.file_name, bytes = upload.len(), "Requesting transcription");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .timeout(self.transcribe_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::parse(format!("Failed to parse transcription: {}", e)))
    }
}

fn build_frame_prompt(time_position: f64, total_duration: f64) -> String {
    format!(
        r##"Analyze this video frame and provide scene information in JSON format:
{{
  "description": "Brief scene description",
  "sceneType": "action|dialogue|establishing|closeup|wide|transition|highlight",
  "mood": "energetic|calm|dramatic|funny|serious|romantic",
  "shotType": "closeup|medium|wide|extreme_wide",
  "motionLevel": "low|medium|high",
  "dominantColors": ["#hex1", "#hex2", "#hex3"],
  "tags": ["tag1", "tag2", "tag3"],
  "confidence": 0.95
}}

Return ONLY the JSON object.
Time position: {:.2}s of {:.2}s total."##,
        time_position, total_duration
    )
}

/// Parse the model reply, tolerating markdown code fences.
fn parse_frame_analysis(content: &str) -> ClientResult<FrameAnalysis> {
    let text = content.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);

    serde_json::from_str(text.trim())
        .map_err(|e| ClientError::parse(format!("Failed to parse frame analysis JSON: {}", e)))
}

fn scene_from_analysis(analysis: FrameAnalysis, time_position: f64, total_duration: f64) -> Scene {
    Scene {
        id: format!("scene_{}", time_position),
        start_time: time_position,
        end_time: time_position + total_duration / FRAME_SCENE_FRACTION,
        description: analysis
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "Scene detected".to_string()),
        confidence: analysis.confidence.unwrap_or(0.8),
        tags: analysis
            .tags
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| vec!["scene".to_string()]),
        scene_type: analysis.scene_type.unwrap_or_default(),
        mood: analysis.mood.unwrap_or_default(),
        dominant_colors: analysis
            .dominant_colors
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| vec!["#000000".to_string()]),
        motion_level: analysis.motion_level.unwrap_or_default(),
        shot_type: analysis.shot_type.unwrap_or_default(),
    }
    .normalized()
}
