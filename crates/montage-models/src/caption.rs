//! Caption models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A timed transcript fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub id: String,
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    pub confidence: f64,
}

impl Caption {
    /// Create a caption, raising `end_time` to `start_time` if needed.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        start_time: f64,
        end_time: f64,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            start_time,
            end_time: end_time.max(start_time),
            confidence,
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }

    /// True when `time` falls inside `[start_time, end_time)`.
    pub fn is_active_at(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_time_order_enforced() {
        let caption = Caption::new("c", "hello", 5.0, 2.0, 0.9);
        assert_eq!(caption.end_time, 5.0);
        assert_eq!(caption.duration(), 0.0);
    }

    #[test]
    fn test_caption_active_window() {
        let caption = Caption::new("c", "hello", 3.0, 7.0, 0.9);
        assert!(caption.is_active_at(3.0));
        assert!(caption.is_active_at(6.99));
        assert!(!caption.is_active_at(7.0));
        assert!(!caption.is_active_at(2.0));
    }

    #[test]
    fn test_caption_wire_format() {
        let json = serde_json::to_value(Caption::new("1", "hi", 0.0, 1.5, 0.9)).unwrap();
        assert_eq!(json["startTime"], 0.0);
        assert_eq!(json["endTime"], 1.5);
    }
}
