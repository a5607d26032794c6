use std::env;

pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
pub const FALLBACK_BACKEND_ORIGIN: &str = "http://34.135.139.239:8000";
pub const METAMORPHOSIS_PATH: &str = "/api/metamorphosis";

/// Proxy configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL the proxy forwards `/api/metamorphosis` to.
    pub backend_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_backend(env::var(BACKEND_URL_VAR).ok().as_deref())
    }

    /// Builds the config from an optional backend value. Unset and empty
    /// values both select the fallback origin.
    pub fn from_backend(raw: Option<&str>) -> Self {
        let origin = match raw.map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => FALLBACK_BACKEND_ORIGIN,
        };
        Self {
            backend_url: resolve_destination(origin),
        }
    }
}

/// Appends the metamorphosis path to an origin unless the value already
/// names the full endpoint.
pub fn resolve_destination(origin: &str) -> String {
    let trimmed = origin.trim_end_matches('/');
    if trimmed.ends_with(METAMORPHOSIS_PATH) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{METAMORPHOSIS_PATH}")
    }
}
