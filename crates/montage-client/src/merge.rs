//! Adjacent-scene merging.
//!
//! Frame-level classification yields many short scenes; neighbours that
//! share a classification and most of their tags are folded together.

use std::collections::HashSet;

use montage_models::Scene;
use tracing::debug;

/// Tag-set Jaccard similarity a pair must exceed to merge.
pub const TAG_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Scenes separated by this many seconds or more never merge.
pub const MAX_MERGE_GAP_SECS: f64 = 10.0;

/// Jaccard similarity of two tag sets (0 when both are empty).
pub fn tag_similarity(a: &[String], b: &[String]) -> f64 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

/// Same type, same mood and overlapping tag vocabulary.
pub fn scenes_similar(a: &Scene, b: &Scene) -> bool {
    a.scene_type == b.scene_type
        && a.mood == b.mood
        && tag_similarity(&a.tags, &b.tags) > TAG_SIMILARITY_THRESHOLD
}

/// Merge runs of similar, nearby scenes in a single ordered pass.
pub fn merge_similar_scenes(scenes: Vec<Scene>) -> Vec<Scene> {
    let input_len = scenes.len();
    let mut iter = scenes.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::with_capacity(input_len);
    for scene in iter {
        if scenes_similar(&current, &scene) && scene.start_time - current.end_time < MAX_MERGE_GAP_SECS {
            absorb(&mut current, scene);
        } else {
            merged.push(std::mem::replace(&mut current, scene));
        }
    }
    merged.push(current);

    debug!(before = input_len, after = merged.len(), "Merged similar scenes");
    merged
}

fn absorb(current: &mut Scene, next: Scene) {
    current.start_time = current.start_time.min(next.start_time);
    current.end_time = current.end_time.max(next.end_time);
    current.confidence = current.confidence.max(next.confidence);

    for tag in next.tags {
        if !current.tags.contains(&tag) {
            current.tags.push(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use montage_models::{Mood, SceneType};

    fn scene(id: &str, start: f64, end: f64, tags: &[&str]) -> Scene {
        Scene::new(id, start, end, id)
            .with_classification(SceneType::Action, Mood::Energetic)
            .with_tags(tags.iter().copied())
            .with_confidence(0.6)
    }

    fn tags(t: &[&str]) -> Vec<String> {
        t.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tag_similarity() {
        assert_eq!(tag_similarity(&tags(&["a", "b"]), &tags(&["b", "c"])), 1.0 / 3.0);
        assert_eq!(tag_similarity(&tags(&["a"]), &tags(&["a", "a"])), 1.0);
        assert_eq!(tag_similarity(&[], &[]), 0.0);
        assert_eq!(tag_similarity(&tags(&["a"]), &[]), 0.0);
    }

    #[test]
    fn test_merges_similar_adjacent_scenes() {
        let first = scene("s1", 0.0, 12.0, &["car", "chase", "road"]);
        let second = scene("s2", 12.0, 24.0, &["car", "chase", "bridge"]).with_confidence(0.9);

        let merged = merge_similar_scenes(vec![first, second]);

        assert_eq!(merged.len(), 1);
        let m = &merged[0];
        assert_eq!(m.id, "s1");
        assert_eq!(m.start_time, 0.0);
        assert_eq!(m.end_time, 24.0);
        assert_eq!(m.confidence, 0.9);
        assert_eq!(m.tags, tags(&["car", "chase", "road", "bridge"]));
    }

    #[test]
    fn test_gap_of_ten_seconds_blocks_merge() {
        let merged = merge_similar_scenes(vec![
            scene("s1", 0.0, 5.0, &["car"]),
            scene("s2", 15.0, 20.0, &["car"]),
        ]);
        assert_eq!(merged.len(), 2);

        let merged = merge_similar_scenes(vec![
            scene("s1", 0.0, 5.0, &["car"]),
            scene("s2", 14.9, 20.0, &["car"]),
        ]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_similarity_must_exceed_threshold() {
        // 1 shared of 4 total = 0.25
        let merged = merge_similar_scenes(vec![
            scene("s1", 0.0, 5.0, &["a", "b"]),
            scene("s2", 5.0, 10.0, &["b", "c", "d"]),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_different_mood_blocks_merge() {
        let calm = scene("s2", 5.0, 10.0, &["car"]).with_classification(SceneType::Action, Mood::Calm);
        let merged = merge_similar_scenes(vec![scene("s1", 0.0, 5.0, &["car"]), calm]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_runs_collapse_transitively() {
        let merged = merge_similar_scenes(vec![
            scene("s1", 0.0, 5.0, &["car"]),
            scene("s2", 5.0, 10.0, &["car"]),
            scene("s3", 10.0, 15.0, &["car"]),
            scene("s4", 15.0, 20.0, &["boat"]),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].end_time, 15.0);
        assert_eq!(merged[1].id, "s4");
    }

    #[test]
    fn test_empty_and_single() {
        assert!(merge_similar_scenes(Vec::new()).is_empty());
        assert_eq!(merge_similar_scenes(vec![scene("s1", 0.0, 1.0, &[])]).len(), 1);
    }
}
