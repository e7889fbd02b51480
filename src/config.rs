use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "hormone-survey";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter(development: bool) -> &'static str {
    if development {
        "hormone_survey_lib=debug,tower_http=debug"
    } else {
        "hormone_survey_lib=info,tower_http=info"
    }
}

/// `APP_ENV=development` turns on debug logging and error details.
pub fn is_development(app_env: Option<&str>) -> bool {
    app_env.is_some_and(|env| env.trim().eq_ignore_ascii_case("development"))
}

/// Where submitted responses and emails go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Persistence endpoints answer 503.
    None,
    /// Process-local, lost on restart.
    Memory,
    Upstash { url: String, token: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub store_timeout_secs: u64,
    /// Internal error details are only exposed to clients in development.
    pub development: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup. Unparseable values fall back to
    /// their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = var("HORMONE_SURVEY_BIND")
            .and_then(|raw| match raw.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    tracing::warn!(value = %raw, "Invalid HORMONE_SURVEY_BIND, using default");
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);

        let store_timeout_secs = var("HORMONE_SURVEY_STORE_TIMEOUT_SECS")
            .and_then(|raw| raw.parse::<u64>().ok().filter(|secs| *secs > 0))
            .unwrap_or(DEFAULT_STORE_TIMEOUT_SECS);

        let upstash = match (var("UPSTASH_REDIS_REST_URL"), var("UPSTASH_REDIS_REST_TOKEN")) {
            (Some(url), Some(token)) => Some(StoreBackend::Upstash { url, token }),
            _ => None,
        };

        let store = match var("HORMONE_SURVEY_STORE").map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("memory") => StoreBackend::Memory,
            Some("none") => StoreBackend::None,
            Some("upstash") => upstash.unwrap_or_else(|| {
                tracing::warn!("HORMONE_SURVEY_STORE=upstash but Upstash credentials are missing");
                StoreBackend::None
            }),
            Some(other) => {
                tracing::warn!(value = other, "Unknown HORMONE_SURVEY_STORE, storage disabled");
                StoreBackend::None
            }
            None => upstash.unwrap_or(StoreBackend::None),
        };

        let development = is_development(var("APP_ENV").as_deref());

        Self {
            bind_addr,
            store,
            store_timeout_secs,
            development,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.store, StoreBackend::None);
        assert_eq!(config.store_timeout_secs, DEFAULT_STORE_TIMEOUT_SECS);
        assert!(!config.development);
    }

    #[test]
    fn upstash_selected_when_credentials_present() {
        let config = config(&[
            ("UPSTASH_REDIS_REST_URL", "https://eu1.upstash.io"),
            ("UPSTASH_REDIS_REST_TOKEN", "secret"),
        ]);
        assert_eq!(
            config.store,
            StoreBackend::Upstash {
                url: "https://eu1.upstash.io".into(),
                token: "secret".into()
            }
        );
    }

    #[test]
    fn half_configured_upstash_disables_storage() {
        let config = config(&[("UPSTASH_REDIS_REST_URL", "https://eu1.upstash.io")]);
        assert_eq!(config.store, StoreBackend::None);
    }

    #[test]
    fn explicit_backend_overrides_credentials() {
        let config = config(&[
            ("HORMONE_SURVEY_STORE", "Memory"),
            ("UPSTASH_REDIS_REST_URL", "https://eu1.upstash.io"),
            ("UPSTASH_REDIS_REST_TOKEN", "secret"),
        ]);
        assert_eq!(config.store, StoreBackend::Memory);
    }

    #[test]
    fn unknown_backend_disables_storage() {
        assert_eq!(config(&[("HORMONE_SURVEY_STORE", "postgres")]).store, StoreBackend::None);
    }

    #[test]
    fn bind_and_timeout_parsing() {
        let config = config(&[
            ("HORMONE_SURVEY_BIND", "0.0.0.0:8080"),
            ("HORMONE_SURVEY_STORE_TIMEOUT_SECS", "3"),
        ]);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.store_timeout_secs, 3);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[
            ("HORMONE_SURVEY_BIND", "not-an-address"),
            ("HORMONE_SURVEY_STORE_TIMEOUT_SECS", "0"),
        ]);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.store_timeout_secs, DEFAULT_STORE_TIMEOUT_SECS);
    }

    #[test]
    fn development_mode() {
        assert!(config(&[("APP_ENV", "development")]).development);
        assert!(!config(&[("APP_ENV", "production")]).development);
    }

    #[test]
    fn log_filter_by_mode() {
        assert!(default_log_filter(true).contains("debug"));
        assert_eq!(default_log_filter(false), "hormone_survey_lib=info,tower_http=info");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
