use serde::Deserialize;
use std::env;
use tracing::warn;

pub const ENV_REQUIRE_ALG: &str = "COMPACT_TOKEN_REQUIRE_ALG";
pub const ENV_DEFAULT_TTL: &str = "COMPACT_TOKEN_DEFAULT_TTL";

const DEFAULT_TTL_SECONDS: i64 = 3600;

/// Tunables for [`TokenCodec`](crate::TokenCodec).
///
/// Deserializable so it can sit inside a host application's own config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Reject tokens whose header `alg` is missing or not `HS256`.
    pub require_algorithm: bool,
    /// Lifetime used by callers that do not pick one.
    pub default_ttl_seconds: i64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            require_algorithm: false,
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

impl CodecConfig {
    /// Defaults overridden by `COMPACT_TOKEN_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = CodecConfig::default();

        if let Some(raw) = lookup(ENV_REQUIRE_ALG) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.require_algorithm = true,
                "0" | "false" | "no" | "off" => config.require_algorithm = false,
                _ => warn!(var = ENV_REQUIRE_ALG, value = %raw, "ignoring unrecognised boolean"),
            }
        }

        if let Some(raw) = lookup(ENV_DEFAULT_TTL) {
            match raw.trim().parse::<i64>() {
                Ok(ttl) => config.default_ttl_seconds = ttl,
                Err(e) => warn!(var = ENV_DEFAULT_TTL, value = %raw, error = %e, "ignoring invalid ttl"),
            }
        }

        config
    }
}
