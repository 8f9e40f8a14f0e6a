//! Caption chunking for plain-text transcripts.

use montage_models::Caption;

/// Words per generated caption.
pub const WORDS_PER_CAPTION: usize = 8;

/// Timeline length assumed when the real duration is unknown.
pub const ASSUMED_DURATION_SECS: f64 = 120.0;

const CAPTION_CONFIDENCE: f64 = 0.9;

/// Split a transcript into fixed-size word chunks spread over `duration`.
///
/// Timing is proportional to word position since the transcript carries no
/// word-level timestamps.
pub fn captions_from_transcript(text: &str, duration: f64) -> Vec<Caption> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let duration = if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        ASSUMED_DURATION_SECS
    };
    let total = words.len() as f64;

    words
        .chunks(WORDS_PER_CAPTION)
        .enumerate()
        .map(|(chunk, chunk_words)| {
            let first_word = chunk * WORDS_PER_CAPTION;
            let start = first_word as f64 / total * duration;
            let end = ((first_word + WORDS_PER_CAPTION) as f64 / total * duration).min(duration);
            Caption::new(
                format!("caption_{}", first_word),
                chunk_words.join(" "),
                start,
                end,
                CAPTION_CONFIDENCE,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transcript() {
        assert!(captions_from_transcript("", 60.0).is_empty());
        assert!(captions_from_transcript("   \n ", 60.0).is_empty());
    }

    #[test]
    fn test_chunks_of_eight_words() {
        let text = (1..=20).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let captions = captions_from_transcript(&text, 40.0);

        assert_eq!(captions.len(), 3);
        assert_eq!(captions[0].id, "caption_0");
        assert_eq!(captions[1].id, "caption_8");
        assert_eq!(captions[0].text, "w1 w2 w3 w4 w5 w6 w7 w8");
        assert_eq!(captions[2].text, "w17 w18 w19 w20");
        assert_eq!(captions[0].start_time, 0.0);
        assert_eq!(captions[0].end_time, 16.0);
        assert_eq!(captions[1].start_time, 16.0);
        assert_eq!(captions[2].end_time, 40.0);
        assert!(captions.iter().all(|c| c.confidence == 0.9));
    }

    #[test]
    fn test_unknown_duration_uses_assumed_length() {
        let captions = captions_from_transcript("one two three four", 0.0);
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].end_time, ASSUMED_DURATION_SECS);
    }
}
