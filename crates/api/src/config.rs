use crate::auth::jwt::JwtConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Bulk sends outlive a timed-out request, so this only bounds how long a
/// client waits for the per-lead results.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// HTTP server settings for the leadflow API.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load settings from the process environment.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `8000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                   |
    ///
    /// JWT settings come from [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), JwtConfig::from_env())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    ///
    /// # Panics
    ///
    /// Panics if `PORT` or `REQUEST_TIMEOUT_SECS` is set but not a number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, jwt: JwtConfig) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT").map_or(DEFAULT_PORT, |v| {
            v.trim().parse().expect("PORT must be a valid u16")
        });
        let request_timeout_secs = var("REQUEST_TIMEOUT_SECS")
            .map_or(DEFAULT_REQUEST_TIMEOUT_SECS, |v| {
                v.trim()
                    .parse()
                    .expect("REQUEST_TIMEOUT_SECS must be a valid u64")
            });

        Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            cors_origins: split_origins(
                &var("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            ),
            request_timeout_secs,
            jwt,
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
