use once_cell::sync::Lazy;
use std::{env, time::Duration};

/// Holds all tunables, read-once from ENV with fallbacks.
#[derive(Debug, Clone)]
pub struct Settings {
    pub metadata_base_url: String,
    pub metadata_auth_token: String,
    pub metadata_language: String,
    pub image_base_url: String,
    pub player_base_url: String,
    pub request_timeout: Duration,
    pub intro_duration: Duration,
    pub show_intro: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        // optionally load .env
        let _ = dotenvy::dotenv();

        fn parse_string(var: &str, default: &str) -> String {
            env::var(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        // helper to parse seconds into Duration
        fn parse_secs(var: &str, default_secs: u64) -> Duration {
            env::var(var)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or_else(|| Duration::from_secs(default_secs))
        }

        // helper to parse millis into Duration
        fn parse_millis(var: &str, default_ms: u64) -> Duration {
            env::var(var)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or_else(|| Duration::from_millis(default_ms))
        }

        fn parse_bool(var: &str, default: bool) -> bool {
            match env::var(var).ok().as_deref().map(str::trim) {
                Some("1") | Some("true") | Some("yes") => true,
                Some("0") | Some("false") | Some("no") => false,
                _ => default,
            }
        }

        Settings {
            metadata_base_url: parse_string("TMDB_URL", "https://api.themoviedb.org/3"),
            metadata_auth_token: env::var("TMDB_AUTH").unwrap_or_default(),
            metadata_language: parse_string("METADATA_LANGUAGE", "en-US"),
            image_base_url: parse_string("TMDB_IMAGE_URL", "https://image.tmdb.org/t/p"),
            player_base_url: parse_string("PLAYER_BASE_URL", "https://apimocine.vercel.app"),
            request_timeout: parse_secs("REQUEST_TIMEOUT_SECS", 10),
            intro_duration: parse_millis("INTRO_DURATION_MS", 5_500),
            show_intro: parse_bool("SHOW_INTRO", true),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            metadata_base_url: "https://api.themoviedb.org/3".to_string(),
            metadata_auth_token: String::new(),
            metadata_language: "en-US".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            player_base_url: "https://apimocine.vercel.app".to_string(),
            request_timeout: Duration::from_secs(10),
            intro_duration: Duration::from_millis(5_500),
            show_intro: true,
        }
    }
}

/// Global settings instance
pub static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);
