//! Sidebar feature catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A sidebar section of the open panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    #[default]
    Chat,
    Video,
    Audio,
    Settings,
}

/// A tool card listed under a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureTool {
    pub name: &'static str,
    pub summary: &'static str,
}

impl Feature {
    /// Sidebar order.
    pub const ALL: [Feature; 4] = [Feature::Chat, Feature::Video, Feature::Audio, Feature::Settings];

    pub fn id(&self) -> &'static str {
        match self {
            Feature::Chat => "chat",
            Feature::Video => "video",
            Feature::Audio => "audio",
            Feature::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Feature::Chat => "AI Chatbot",
            Feature::Video => "Video Tools",
            Feature::Audio => "Audio Processing",
            Feature::Settings => "Settings",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Feature::Chat => "Intelligent conversation and assistance",
            Feature::Video => "AI-powered video editing features",
            Feature::Audio => "Smart audio enhancement and editing",
            Feature::Settings => "Configure your AI editor preferences",
        }
    }

    pub fn tools(&self) -> &'static [FeatureTool] {
        match self {
            Feature::Chat => &[
                FeatureTool {
                    name: "Color grading advice",
                    summary: "How can I improve the color grading of this scene?",
                },
                FeatureTool {
                    name: "Transition ideas",
                    summary: "Suggest transitions for this sequence",
                },
            ],
            Feature::Video => &[
                FeatureTool {
                    name: "Auto Scene Detection",
                    summary: "Automatically detect and segment scenes",
                },
                FeatureTool {
                    name: "Smart Color Grading",
                    summary: "AI-powered color correction and enhancement",
                },
            ],
            Feature::Audio => &[
                FeatureTool {
                    name: "Noise Reduction",
                    summary: "Remove background noise automatically",
                },
                FeatureTool {
                    name: "Voice Enhancement",
                    summary: "Improve voice clarity and quality",
                },
            ],
            Feature::Settings => &[
                FeatureTool {
                    name: "AI Model Selection",
                    summary: "Choose your preferred AI model",
                },
                FeatureTool {
                    name: "Performance Settings",
                    summary: "Adjust processing speed and quality",
                },
            ],
        }
    }

    /// Look up a feature by its sidebar id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
