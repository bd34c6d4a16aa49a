use crate::enrichment::MissingScoreOrder;

const DEFAULT_FALSITY_CSV: &str = "data/falsity_scores.csv";
const DEFAULT_DENSITY_CSV: &str = "data/misinfo_samples.csv";

/// Settings handed to the scoring API client at construction time.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Base URL requests are issued against (`https://<host>` unless overridden).
    pub base_url: String,
    /// Value of the `X-RapidAPI-Host` header.
    pub host: String,
    /// Value of the `X-RapidAPI-Key` header.
    pub key: String,
    /// Lowercase handles before they are placed in the request path.
    pub normalize_case: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scoring: ScoringConfig,
    pub falsity_csv: String,
    pub density_csv: String,
    pub missing_scores: MissingScoreOrder,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("RAPIDAPI_HOST")
            .ok_or_else(|| anyhow::anyhow!("RAPIDAPI_HOST environment variable required"))
            .and_then(|host| {
                if host.trim().is_empty() {
                    anyhow::bail!("RAPIDAPI_HOST cannot be empty");
                }
                Ok(host.trim().to_string())
            })?;

        let key = var("RAPIDAPI_KEY")
            .ok_or_else(|| anyhow::anyhow!("RAPIDAPI_KEY environment variable required"))
            .and_then(|key| {
                if key.trim().is_empty() {
                    anyhow::bail!("RAPIDAPI_KEY cannot be empty");
                }
                Ok(key)
            })?;

        let base_url = var("SCORING_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("https://{}", host));
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("SCORING_BASE_URL must start with http:// or https://");
        }

        let normalize_case = match var("NORMALIZE_HANDLE_CASE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                anyhow::anyhow!("NORMALIZE_HANDLE_CASE must be true or false, got '{}'", raw)
            })?,
            None => false,
        };

        let missing_scores = match var("MISSING_SCORES") {
            Some(raw) => raw.parse::<MissingScoreOrder>().map_err(|e| anyhow::anyhow!(e))?,
            None => MissingScoreOrder::default(),
        };

        let config = Self {
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            scoring: ScoringConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                host,
                key,
                normalize_case,
            },
            falsity_csv: var("FALSITY_CSV").unwrap_or_else(|| DEFAULT_FALSITY_CSV.to_string()),
            density_csv: var("DENSITY_CSV").unwrap_or_else(|| DEFAULT_DENSITY_CSV.to_string()),
            missing_scores,
        };

        // Key is never logged
        tracing::debug!("Scoring base URL: {}", config.scoring.base_url);
        tracing::debug!("Scoring host header: {}", config.scoring.host);
        tracing::debug!("Normalize handle case: {}", config.scoring.normalize_case);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_vars(vars(&[
            ("RAPIDAPI_HOST", "mescalc.p.rapidapi.com"),
            ("RAPIDAPI_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.scoring.base_url, "https://mescalc.p.rapidapi.com");
        assert!(!config.scoring.normalize_case);
        assert_eq!(config.missing_scores, MissingScoreOrder::Last);
        assert_eq!(config.falsity_csv, DEFAULT_FALSITY_CSV);
    }

    #[test]
    fn test_missing_key_rejected() {
        let result = Config::from_vars(vars(&[("RAPIDAPI_HOST", "mescalc.p.rapidapi.com")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_host_rejected() {
        let result = Config::from_vars(vars(&[("RAPIDAPI_HOST", "  "), ("RAPIDAPI_KEY", "k")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("RAPIDAPI_HOST", "mescalc.p.rapidapi.com"),
            ("RAPIDAPI_KEY", "secret"),
            ("SCORING_BASE_URL", "http://127.0.0.1:9000/"),
            ("NORMALIZE_HANDLE_CASE", "true"),
            ("MISSING_SCORES", "first"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.scoring.base_url, "http://127.0.0.1:9000");
        assert!(config.scoring.normalize_case);
        assert_eq!(config.missing_scores, MissingScoreOrder::First);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = [("RAPIDAPI_HOST", "h"), ("RAPIDAPI_KEY", "k")];

        let mut bad_url = base.to_vec();
        bad_url.push(("SCORING_BASE_URL", "ftp://h"));
        assert!(Config::from_vars(vars(&bad_url)).is_err());

        let mut bad_bool = base.to_vec();
        bad_bool.push(("NORMALIZE_HANDLE_CASE", "maybe"));
        assert!(Config::from_vars(vars(&bad_bool)).is_err());

        let mut bad_port = base.to_vec();
        bad_port.push(("PORT", "70000"));
        assert!(Config::from_vars(vars(&bad_port)).is_err());
    }
}
