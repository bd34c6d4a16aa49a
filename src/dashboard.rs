use crate::charts;
use crate::deltas::{compute_deltas, format_delta, ScoreDeltas};
use crate::enrichment::{enrich, with_ordinals, MissingScoreOrder};
use crate::models::{RankedFollowRow, ScoreResponse};
use crate::reference_data::ReferenceData;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const NO_EXPOSURE: &str = "No misinformation exposure score available.";
pub const NO_WEIGHTED_EXPOSURE: &str = "No weighted exposure score available.";
pub const NO_PARTISANSHIP: &str = "No partisanship score available.";
pub const NO_FOLLOWING: &str = "No following list available.";

/// One metric widget. Exactly one of `value` and `placeholder` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricCard {
    pub label: String,
    pub value: Option<f64>,
    pub delta: Option<f64>,
    /// e.g. `"12.50% higher than average"`.
    pub delta_label: Option<String>,
    pub placeholder: Option<String>,
}

impl MetricCard {
    fn new(label: &str, value: Option<f64>, delta: Option<f64>, missing: &str) -> Self {
        match value {
            Some(v) => Self {
                label: label.to_string(),
                value: Some(v),
                delta,
                delta_label: format_delta(delta),
                placeholder: None,
            },
            None => Self {
                label: label.to_string(),
                value: None,
                delta: None,
                delta_label: None,
                placeholder: Some(missing.to_string()),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardCharts {
    #[schema(value_type = Option<Object>)]
    pub partisanship: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub exposure_density: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FollowTable {
    pub caption: Option<String>,
    pub rows: Vec<RankedFollowRow>,
    pub placeholder: Option<String>,
}

/// Everything the dashboard shows for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    pub screen_name: Option<String>,
    pub user_id: Option<String>,
    pub exposure: MetricCard,
    pub weighted_exposure: MetricCard,
    pub partisanship: MetricCard,
    pub deltas: ScoreDeltas,
    pub charts: DashboardCharts,
    pub following: FollowTable,
    pub retrieved_at: String,
}

impl DashboardView {
    /// Builds the view for a found account. Each section degrades on its own
    /// when its field is missing.
    pub fn build(
        scores: &ScoreResponse,
        reference: &ReferenceData,
        missing_order: MissingScoreOrder,
    ) -> Self {
        let deltas = compute_deltas(scores.misinfo_exposure_score, scores.partisan_score);

        let exposure = MetricCard::new(
            "Exposure",
            scores.misinfo_exposure_score,
            deltas.misinfo,
            NO_EXPOSURE,
        );
        // No reference mean exists for the weighted score
        let weighted_exposure = MetricCard::new(
            "Weighted exposure",
            scores.misinfo_exposure_score_weighted_numtweets,
            None,
            NO_WEIGHTED_EXPOSURE,
        );
        let partisanship = MetricCard::new(
            "Partisanship",
            scores.partisan_score,
            deltas.partisan,
            NO_PARTISANSHIP,
        );

        let charts = DashboardCharts {
            partisanship: scores.partisan_score.map(charts::partisanship_chart),
            exposure_density: scores
                .misinfo_exposure_score
                .map(|s| charts::exposure_density_chart(reference.density.values(), s)),
        };

        let following = match &scores.following {
            Some(handles) => {
                let rows = with_ordinals(enrich(handles, &reference.falsity, missing_order));
                let count = scores.num_following.unwrap_or(handles.len() as u64);
                let who = scores
                    .twitter_screen_name
                    .as_deref()
                    .map(str::to_lowercase)
                    .unwrap_or_else(|| "this account".to_string());
                FollowTable {
                    caption: Some(format!(
                        "The estimates above are based on these {} users {} follows:",
                        count, who
                    )),
                    rows,
                    placeholder: None,
                }
            }
            None => FollowTable {
                caption: None,
                rows: Vec::new(),
                placeholder: Some(NO_FOLLOWING.to_string()),
            },
        };

        Self {
            screen_name: scores.twitter_screen_name.clone(),
            user_id: scores.twitter_user_id.clone(),
            exposure,
            weighted_exposure,
            partisanship,
            deltas,
            charts,
            following,
            retrieved_at: Utc::now().to_rfc3339(),
        }
    }
}
