use crate::enrichment::FalsityTable;
use anyhow::Context;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FalsityRecord {
    account: String,
    falsity_score: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SampleRecord {
    score: Option<String>,
}

/// Reference exposure scores, used only to draw the comparison density curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DensitySamples(pub Vec<f64>);

impl DensitySamples {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open density samples {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to read density samples {}", path.display()))
    }

    /// Reads a CSV with a `score` column. Blank or non-numeric cells are skipped.
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut values = Vec::new();

        for (line, record) in csv_reader.deserialize::<SampleRecord>().enumerate() {
            let record = record?;
            match parse_score(record.score.as_deref()) {
                Some(v) => values.push(v),
                None => tracing::warn!("Skipping density sample on row {}", line + 1),
            }
        }

        Ok(Self(values))
    }
}

impl FalsityTable {
    /// Loads the table from a CSV file with `account,falsity_score` columns.
    pub fn from_csv_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open falsity table {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to read falsity table {}", path.display()))
    }

    /// Rows with an empty handle or unusable score are skipped with a warning.
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut pairs = Vec::new();

        for (line, record) in csv_reader.deserialize::<FalsityRecord>().enumerate() {
            let record = record?;
            if record.account.is_empty() {
                tracing::warn!("Skipping falsity row {}: empty account", line + 1);
                continue;
            }
            match parse_score(record.falsity_score.as_deref()) {
                Some(score) => pairs.push((record.account, score)),
                None => tracing::warn!(
                    "Skipping falsity row {} ({}): missing or invalid score",
                    line + 1,
                    record.account
                ),
            }
        }

        Ok(Self::from_pairs(pairs))
    }
}

fn parse_score(raw: Option<&str>) -> Option<f64> {
    raw.filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Static tables loaded once at startup and shared read-only by every request.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub falsity: FalsityTable,
    pub density: DensitySamples,
}

impl ReferenceData {
    pub fn load(falsity_csv: &str, density_csv: &str) -> anyhow::Result<Self> {
        let falsity = FalsityTable::from_csv_path(falsity_csv)?;
        let density = DensitySamples::from_csv_path(density_csv)?;

        tracing::info!(
            "Reference data loaded: {} falsity entries, {} density samples",
            falsity.len(),
            density.values().len()
        );

        Ok(Self { falsity, density })
    }
}
