/// Follow-list enrichment
///
/// Joins the accounts a user follows against the static falsity table:
/// 1. Left join every followed handle to its falsity score (if any)
/// 2. Sort by falsity score, highest first
/// 3. Place accounts without a score in one block at the configured end
use crate::models::{EnrichedFollowRow, RankedFollowRow};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

/// Where rows without a falsity score are placed after sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingScoreOrder {
    First,
    #[default]
    Last,
}

impl FromStr for MissingScoreOrder {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            other => Err(format!(
                "unsupported missing score order '{}', expected 'first' or 'last'",
                other
            )),
        }
    }
}

/// Falsity score per account handle. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct FalsityTable {
    scores: HashMap<String, f64>,
}

impl FalsityTable {
    /// Builds a table, keeping the first score seen for a repeated handle.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut scores = HashMap::new();
        for (handle, score) in pairs {
            let handle = handle.into();
            if scores.contains_key(&handle) {
                tracing::warn!("Duplicate falsity entry for '{}', keeping first", handle);
                continue;
            }
            scores.insert(handle, score);
        }
        Self { scores }
    }

    pub fn get(&self, handle: &str) -> Option<f64> {
        self.scores.get(handle).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Left joins `following` against `table` and sorts by falsity, descending.
///
/// Returns exactly one row per input handle. The sort is stable, so equal
/// scores (and all unscored rows) keep their input order.
pub fn enrich(
    following: &[String],
    table: &FalsityTable,
    order: MissingScoreOrder,
) -> Vec<EnrichedFollowRow> {
    let mut rows: Vec<EnrichedFollowRow> = following
        .iter()
        .map(|handle| EnrichedFollowRow {
            handle: handle.clone(),
            falsity_score: table.get(handle),
        })
        .collect();

    rows.sort_by(|a, b| compare_scores(a.falsity_score, b.falsity_score, order));

    let matched = rows.iter().filter(|r| r.falsity_score.is_some()).count();
    tracing::debug!(
        "Enriched {} followed accounts ({} with falsity score)",
        rows.len(),
        matched
    );

    rows
}

fn compare_scores(a: Option<f64>, b: Option<f64>, order: MissingScoreOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match order {
            MissingScoreOrder::First => Ordering::Less,
            MissingScoreOrder::Last => Ordering::Greater,
        },
        (Some(_), None) => match order {
            MissingScoreOrder::First => Ordering::Greater,
            MissingScoreOrder::Last => Ordering::Less,
        },
    }
}

/// Attaches 1-based display positions.
pub fn with_ordinals(rows: Vec<EnrichedFollowRow>) -> Vec<RankedFollowRow> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| RankedFollowRow {
            ordinal: i + 1,
            handle: row.handle,
            falsity_score: row.falsity_score,
        })
        .collect()
}
