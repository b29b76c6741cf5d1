use crate::domain::RoundConfig;
use std::{env, str::FromStr, time::Duration};

// Runtime/server constants and environment overrides for round rules.

pub fn http_port() -> u16 {
    parse_or(env::var("GAME_SERVER_PORT").ok(), 3001)
}

pub fn score_service_url() -> String {
    env::var("SCORE_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:3002".to_string())
}

pub fn score_service_timeout() -> Duration {
    Duration::from_millis(parse_or(env::var("SCORE_SERVICE_TIMEOUT_MS").ok(), 1500))
}

/// Round rules with any environment overrides applied on top of the defaults.
pub fn round_config() -> RoundConfig {
    let mut config = RoundConfig::default();
    let positive = |key: &str, default: f32| {
        let value = parse_or(env::var(key).ok(), default);
        if value > 0.0 { value } else { default }
    };

    config.arena.width = positive("ARENA_WIDTH", config.arena.width);
    config.arena.height = positive("ARENA_HEIGHT", config.arena.height);
    config.projectile.speed = positive("PROJECTILE_SPEED", config.projectile.speed);
    config.target.speed = positive("TARGET_SPEED", config.target.speed);
    config.round.duration_seconds = parse_or(
        env::var("ROUND_DURATION_SECONDS").ok(),
        config.round.duration_seconds,
    )
    .max(1);
    config.round.score_increment = parse_or(
        env::var("SCORE_INCREMENT").ok(),
        config.round.score_increment,
    );
    config.target.min_count = parse_or(env::var("MIN_TARGETS").ok(), config.target.min_count);
    config
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub const COMMAND_CHANNEL_CAPACITY: usize = 256;
pub const NOTICE_CHANNEL_CAPACITY: usize = 16;

pub const TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 120);
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);
