//! Server configuration, read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use campusnet_stories::domain::media::{
    DEFAULT_MAX_RECORDED_VIDEO, DEFAULT_RETENTION_HOURS, StoryPolicy,
};
use campusnet_stories::domain::playback::{
    DEFAULT_IMAGE_DURATION, DEFAULT_TICK_INTERVAL, PlaybackConfig,
};
use chrono::TimeDelta;

use crate::error::AppError;

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// OTLP collector; tracing stays local when unset.
    pub otlp_endpoint: Option<String>,
    /// Upload and retention rules.
    pub policy: StoryPolicy,
    /// Viewer timing rules.
    pub playback: PlaybackConfig,
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or any value
    /// fails to parse or validate.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or any value
    /// fails to parse or validate.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("DATABASE_URL environment variable must be set".to_owned())
            })?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;
        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.trim().is_empty());

        let retention_hours: i64 =
            parse_or(&lookup, "STORY_RETENTION_HOURS", DEFAULT_RETENTION_HOURS)?;
        let max_video_secs: u64 = parse_or(
            &lookup,
            "STORY_MAX_VIDEO_SECONDS",
            DEFAULT_MAX_RECORDED_VIDEO.as_secs(),
        )?;
        let image_ms: u64 = parse_or(
            &lookup,
            "STORY_IMAGE_DURATION_MS",
            millis(DEFAULT_IMAGE_DURATION),
        )?;
        let tick_ms: u64 = parse_or(
            &lookup,
            "STORY_TICK_INTERVAL_MS",
            millis(DEFAULT_TICK_INTERVAL),
        )?;

        let retention = TimeDelta::try_hours(retention_hours)
            .ok_or_else(|| AppError::Config("STORY_RETENTION_HOURS is out of range".to_owned()))?;
        let policy = StoryPolicy::new(retention, Duration::from_secs(max_video_secs))
            .map_err(|e| AppError::Config(e.to_string()))?;
        let playback = PlaybackConfig::new(
            Duration::from_millis(image_ms),
            Duration::from_millis(tick_ms),
        )
        .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            database_url,
            host,
            port,
            otlp_endpoint,
            policy,
            playback,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a valid address.
    pub fn bind_address(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
