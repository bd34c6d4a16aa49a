use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// ============ Scoring API Models ============

/// Prefix of the `message` field the scoring API uses for unknown accounts.
pub const NOT_FOUND_PREFIX: &str = "Cannot find information";

/// Score document returned by the scoring API.
///
/// Every field is optional: the API may null out any score on an otherwise
/// successful lookup, and consumers must handle each absence on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(default)]
    pub twitter_screen_name: Option<String>,
    /// Numeric IDs on the wire are normalized to strings.
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub twitter_user_id: Option<String>,
    #[serde(default)]
    pub misinfo_exposure_score: Option<f64>,
    #[serde(default)]
    pub misinfo_exposure_score_weighted_numtweets: Option<f64>,
    #[serde(default)]
    pub partisan_score: Option<f64>,
    #[serde(default)]
    pub num_following: Option<u64>,
    #[serde(default)]
    pub following: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Result of a lookup, decided once at the fetch boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The API returned a score document (individual scores may still be absent).
    Found(ScoreResponse),
    /// The API reported that it has no information for the account.
    NotFound { reason: String },
}

impl LookupOutcome {
    /// Classifies a parsed response body.
    ///
    /// The not-found marker is checked first on `message`, then anywhere in the
    /// serialized body, which is how older revisions of the API reported it.
    pub fn from_body(body: Value) -> Result<Self, serde_json::Error> {
        if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
            if message.starts_with(NOT_FOUND_PREFIX) {
                return Ok(LookupOutcome::NotFound {
                    reason: message.to_string(),
                });
            }
        }

        let serialized = body.to_string();
        if serialized.contains(NOT_FOUND_PREFIX) {
            return Ok(LookupOutcome::NotFound { reason: serialized });
        }

        serde_json::from_value(body).map(LookupOutcome::Found)
    }
}

// ============ Follow Table Models ============

/// One followed account joined against the falsity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedFollowRow {
    pub handle: String,
    /// `None` when the account is not in the falsity table.
    pub falsity_score: Option<f64>,
}

/// Follow row with its 1-based display position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankedFollowRow {
    pub ordinal: usize,
    pub handle: String,
    pub falsity_score: Option<f64>,
}
