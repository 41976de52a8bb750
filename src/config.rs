//! Relay configuration, read once at startup and injected into the state.

use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3007;
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Where and how the gateway reaches the conversational-AI backend.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub url: String,
    pub token: String,
    /// `None` leaves the request unbounded.
    pub timeout: Option<Duration>,
}

// Keep the bearer token out of logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub upstream: UpstreamConfig,
}

impl RelayConfig {
    /// Reads configuration from the process environment.
    ///
    /// | Variable                | Default   |
    /// |-------------------------|-----------|
    /// | `API_URL`               | required  |
    /// | `API_TOKEN`             | required  |
    /// | `HOST`                  | `0.0.0.0` |
    /// | `PORT`                  | `3007`    |
    /// | `STATIC_DIR`            | `public`  |
    /// | `UPSTREAM_TIMEOUT_SECS` | `60` (`0` disables the timeout) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs: u64 = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "UPSTREAM_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            upstream: UpstreamConfig {
                url: required("API_URL")?,
                token: required("API_TOKEN")?,
                timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            },
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_upstream_is_set() {
        let cfg = RelayConfig::from_lookup(lookup_from(&[
            ("API_URL", "http://upstream.local/run"),
            ("API_TOKEN", "tok"),
        ]))
        .unwrap();

        assert_eq!(cfg.address(), "0.0.0.0:3007");
        assert_eq!(cfg.static_dir, "public");
        assert_eq!(cfg.upstream.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = RelayConfig::from_lookup(lookup_from(&[
            ("API_URL", "http://upstream.local/run"),
            ("API_TOKEN", "tok"),
            ("UPSTREAM_TIMEOUT_SECS", "0"),
            ("PORT", "8088"),
        ]))
        .unwrap();

        assert_eq!(cfg.upstream.timeout, None);
        assert_eq!(cfg.port, 8088);
    }

    #[test]
    fn missing_token_is_reported() {
        let err = RelayConfig::from_lookup(lookup_from(&[("API_URL", "http://x")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_TOKEN")));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = RelayConfig::from_lookup(lookup_from(&[
            ("API_URL", "http://x"),
            ("API_TOKEN", "tok"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn debug_output_hides_token() {
        let cfg = UpstreamConfig {
            url: "http://x".into(),
            token: "super-secret".into(),
            timeout: None,
        };
        assert!(!format!("{cfg:?}").contains("super-secret"));
    }
}
