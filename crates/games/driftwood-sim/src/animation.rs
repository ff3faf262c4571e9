use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// State name used by sprites with a single animation strip.
pub const DEFAULT_STATE: &str = "default";

/// Frame counts per sprite and state name.
///
/// The simulation never touches image data; it only needs to know how many
/// frames a state has so it can tell when a cycle completes. Unknown
/// entries count as a single frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationSet {
    sprites: HashMap<String, HashMap<String, usize>>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame counts matching the stock sprite sheets.
    pub fn standard() -> Self {
        Self::new()
            .with("player", "idle", 5)
            .with("player", "run", 6)
            .with("player", "jump", 3)
            .with("player", "fall", 1)
            .with("player", "wall", 2)
            .with("player", "attack", 4)
            .with("player", "air_attack", 3)
            .with("shell", "idle", 7)
            .with("shell", "fire", 6)
            .with("tooth", DEFAULT_STATE, 4)
            .with("pearl", DEFAULT_STATE, 1)
            .with("saw", DEFAULT_STATE, 8)
            .with("floor_spike", DEFAULT_STATE, 1)
            .with("boat", DEFAULT_STATE, 4)
            .with("palm_small", DEFAULT_STATE, 4)
            .with("palm_large", DEFAULT_STATE, 4)
            .with("candle", DEFAULT_STATE, 6)
            .with("candle_light", DEFAULT_STATE, 6)
    }

    pub fn with(mut self, sprite: &str, state: &str, frames: usize) -> Self {
        self.insert(sprite, state, frames);
        self
    }

    pub fn insert(&mut self, sprite: &str, state: &str, frames: usize) {
        self.sprites
            .entry(sprite.to_string())
            .or_default()
            .insert(state.to_string(), frames);
    }

    /// Overlay `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: &AnimationSet) {
        for (sprite, states) in &other.sprites {
            for (state, &frames) in states {
                self.insert(sprite, state, frames);
            }
        }
    }

    pub fn frame_count(&self, sprite: &str, state: &str) -> usize {
        self.sprites
            .get(sprite)
            .and_then(|states| states.get(state))
            .copied()
            .unwrap_or(1)
            .max(1)
    }
}

/// Visible frame for a running frame counter.
pub fn visible_frame(frame_index: f32, frames: usize) -> usize {
    (frame_index.max(0.0).floor() as usize) % frames.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_entries_have_one_frame() {
        let set = AnimationSet::new();
        assert_eq!(set.frame_count("ghost", "idle"), 1);
    }

    #[test]
    fn zero_is_clamped_to_one() {
        let set = AnimationSet::new().with("x", "y", 0);
        assert_eq!(set.frame_count("x", "y"), 1);
    }

    #[test]
    fn merge_overrides() {
        let mut set = AnimationSet::standard();
        set.merge(&AnimationSet::new().with("shell", "fire", 9));
        assert_eq!(set.frame_count("shell", "fire"), 9);
        assert_eq!(set.frame_count("shell", "idle"), 7);
    }

    #[test]
    fn visible_frame_wraps() {
        assert_eq!(visible_frame(0.0, 4), 0);
        assert_eq!(visible_frame(3.9, 4), 3);
        assert_eq!(visible_frame(4.2, 4), 0);
        assert_eq!(visible_frame(7.0, 0), 0);
    }

    #[test]
    fn parses_from_toml_tables() {
        let set: AnimationSet = toml::from_str(
            r#"
            [player]
            idle = 5
            attack = 4

            [shell]
            fire = 6
            "#,
        )
        .unwrap();
        assert_eq!(set.frame_count("player", "attack"), 4);
        assert_eq!(set.frame_count("shell", "fire"), 6);
    }
}
