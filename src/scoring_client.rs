use crate::config::ScoringConfig;
use crate::errors::AppError;
use crate::models::LookupOutcome;
use url::Url;

/// Normalizes a user-entered handle for use in the request path.
///
/// Strips surrounding whitespace and a single leading `@`, optionally lowercases,
/// and rejects anything that is not a plain handle or numeric ID.
pub fn normalize_handle(raw: &str, normalize_case: bool) -> Result<String, AppError> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);

    if handle.is_empty() {
        return Err(AppError::BadRequest(
            "Please enter a username or ID.".to_string(),
        ));
    }
    if !handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::BadRequest(format!(
            "'{}' is not a valid username or ID.",
            raw.trim()
        )));
    }

    Ok(if normalize_case {
        handle.to_lowercase()
    } else {
        handle.to_string()
    })
}

/// Client for the misinformation exposure scoring API.
#[derive(Clone)]
pub struct ScoringClient {
    client: reqwest::Client,
    config: ScoringConfig,
}

impl ScoringClient {
    /// Creates a new `ScoringClient`.
    ///
    /// No timeout is set: a lookup waits for as long as the API takes.
    pub fn new(config: ScoringConfig) -> Result<Self, AppError> {
        Url::parse(&config.base_url).map_err(|e| {
            AppError::InternalError(format!("Invalid scoring base URL {}: {}", config.base_url, e))
        })?;

        let client = reqwest::Client::builder().build().map_err(|e| {
            AppError::ExternalApiError(format!("Failed to create scoring client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    /// Endpoint URL for an already normalized handle.
    pub fn account_url(&self, handle: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            AppError::InternalError(format!("Invalid scoring base URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| AppError::InternalError("Scoring base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("account")
            .push(handle);
        Ok(url)
    }

    /// Looks up the scores for a user-entered handle.
    ///
    /// The body is parsed whatever the status code, because the API reports
    /// unknown accounts inside the JSON body. Anything else that is not a
    /// successful score document becomes `AppError::ExternalApiError`.
    ///
    /// # Returns
    ///
    /// * `Result<LookupOutcome, AppError>` - `Found` or `NotFound`, or a transport error.
    pub async fn fetch(&self, raw_handle: &str) -> Result<LookupOutcome, AppError> {
        let handle = normalize_handle(raw_handle, self.config.normalize_case)?;
        let url = self.account_url(&handle)?;
        tracing::info!("Fetching scores for {}", handle);
        tracing::debug!("Scoring API URL: {}", url);

        let response = self
            .client
            .get(url)
            .header("X-RapidAPI-Host", &self.config.host)
            .header("X-RapidAPI-Key", &self.config.key)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Scoring request failed: {}", e)))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to read scoring response: {}", e))
        })?;

        let body: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            AppError::ExternalApiError(format!(
                "Scoring API returned {} with a non-JSON body: {}",
                status, e
            ))
        })?;

        let outcome = LookupOutcome::from_body(body).map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse scoring response: {}", e))
        })?;

        match &outcome {
            LookupOutcome::NotFound { reason } => {
                tracing::info!("No scores for {}: {}", handle, reason);
            }
            LookupOutcome::Found(_) if !status.is_success() => {
                tracing::warn!("Scoring API returned {} for {}", status, handle);
                return Err(AppError::ExternalApiError(format!(
                    "Scoring API returned status {}: {}",
                    status, text
                )));
            }
            LookupOutcome::Found(_) => {
                tracing::info!("✓ Scores retrieved for {}", handle);
            }
        }

        Ok(outcome)
    }
}
