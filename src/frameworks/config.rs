use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::domain::input::KeyMapping;

// Runtime constants (not gameplay tuning).

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

pub fn arena_width() -> f32 {
    env_parse("ARENA_WIDTH", 784.0)
}

pub fn arena_height() -> f32 {
    env_parse("ARENA_HEIGHT", 400.0)
}

/// Frame callbacks per second; the logic step rate stays capped at 60 Hz
/// regardless.
pub fn display_hz() -> u32 {
    env_parse("DISPLAY_HZ", 60).max(1)
}

/// Wall-clock bound on a demo match (0 disables the limit-based end).
pub fn match_time_limit() -> Duration {
    Duration::from_secs(env_parse("MATCH_TIME_LIMIT_SECS", 600))
}

/// When set, sprites are read from this directory instead of the built-in
/// dimension catalog.
pub fn sprite_dir() -> Option<PathBuf> {
    env::var("SPRITE_DIR").ok().map(PathBuf::from)
}

pub fn left_player_mapping() -> KeyMapping {
    KeyMapping {
        left: "ArrowLeft".to_string(),
        right: "ArrowRight".to_string(),
        jump: "ArrowUp".to_string(),
        crouch: "ArrowDown".to_string(),
        shoot: "Control".to_string(),
    }
}

pub fn right_player_mapping() -> KeyMapping {
    KeyMapping {
        left: "q".to_string(),
        right: "d".to_string(),
        jump: "z".to_string(),
        crouch: "s".to_string(),
        shoot: " ".to_string(),
    }
}
