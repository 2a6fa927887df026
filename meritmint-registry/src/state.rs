use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Fixed achievement categories a draft may carry.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementType {
    Hackathon,
    Workshop,
    Course,
    Project,
    Certification,
    Competition,
    Conference,
    Internship,
}

impl AchievementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hackathon => "Hackathon",
            Self::Workshop => "Workshop",
            Self::Course => "Course",
            Self::Project => "Project",
            Self::Certification => "Certification",
            Self::Competition => "Competition",
            Self::Conference => "Conference",
            Self::Internship => "Internship",
        }
    }
}

impl fmt::Display for AchievementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named tone used to pick a description template. Unrecognized names parse
/// to `Professional` so callers never fail on a style string alone.
#[derive(Serialize, JsonSchema, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionStyle {
    #[default]
    Professional,
    Technical,
    Junior,
    Creative,
}

impl DescriptionStyle {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "technical" => Self::Technical,
            "junior" => Self::Junior,
            "creative" => Self::Creative,
            _ => Self::Professional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Technical => "technical",
            Self::Junior => "junior",
            Self::Creative => "creative",
        }
    }
}

impl FromStr for DescriptionStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<'de> Deserialize<'de> for DescriptionStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// User-entered, not-yet-persisted achievement data. Owned and mutated by
/// the caller; the registry only ever reads it.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub achievement_type: AchievementType,
    pub date: NaiveDate,
    pub role: String,
    /// Ordered distinct tags; duplicates are rejected at mint time.
    pub technologies: Vec<String>,
    /// 0x-prefixed hex, format-checked only — never cryptographically
    /// verified.
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One trait/value pair. The `trait_type`/`value` key names are a wire
/// contract shared with the profile and certificate renderers.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

impl Attribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// Persisted achievement entry, immutable once appended. The camelCase key
/// names are the wire contract external renderers depend on.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    pub token_id: String,
    pub name: String,
    pub description: String,
    pub attributes: Vec<Attribute>,
    pub transaction_hash: String,
    pub minted_at: DateTime<Utc>,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_hash: Option<String>,
}

/// Metadata blob offered to the off-chain publisher at mint time.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub attributes: Vec<Attribute>,
}

/// Tuning for the simulated mint engine.
#[derive(Debug, Clone)]
pub struct MintConfig {
    /// Exclusive upper bound of the token id space. The default is the full
    /// u64 space; tests shrink it to force collisions. A bound of zero is
    /// treated as 1 (the single token id "0").
    pub token_bound: u64,
    /// Identifier allocation attempts before a conflict surfaces.
    pub max_id_attempts: u32,
    /// Artificial latency slept while the mint gate is held.
    pub simulated_latency: Duration,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            token_bound: u64::MAX,
            max_id_attempts: 3,
            simulated_latency: Duration::ZERO,
        }
    }
}
