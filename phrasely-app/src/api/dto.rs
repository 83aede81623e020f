use chrono::{DateTime, Utc};
use phrasely_core::{CardSnapshot, CoreError, IntervalPreview, PreviewConfig, PreviewSet, Rating};
use serde::{Deserialize, Serialize};

/// Body of the preview exchange. Fields are optional so a missing one can
/// be reported as a structured error before any policy evaluation runs.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewRequest {
    pub card: Option<CardSnapshot>,
    pub now: Option<DateTime<Utc>>,
    pub config: Option<PreviewConfig>,
}

impl PreviewRequest {
    pub fn into_parts(self) -> Result<(CardSnapshot, DateTime<Utc>, PreviewConfig), CoreError> {
        let card = self.card.ok_or(CoreError::MissingField("card"))?;
        let now = self.now.ok_or(CoreError::MissingField("now"))?;
        let config = self.config.ok_or(CoreError::MissingField("config"))?;
        Ok((card, now, config))
    }
}

/// Body of the apply exchange: same shape plus the rating to commit.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyRequest {
    pub card: Option<CardSnapshot>,
    pub now: Option<DateTime<Utc>>,
    pub config: Option<PreviewConfig>,
    pub rating: Option<String>,
}

impl ApplyRequest {
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> Result<(CardSnapshot, DateTime<Utc>, PreviewConfig, Rating), CoreError> {
        let card = self.card.ok_or(CoreError::MissingField("card"))?;
        let now = self.now.ok_or(CoreError::MissingField("now"))?;
        let config = self.config.ok_or(CoreError::MissingField("config"))?;
        let raw = self.rating.ok_or(CoreError::MissingField("rating"))?;
        let rating = parse_rating(&raw).ok_or(CoreError::InvalidRating(raw))?;
        Ok((card, now, config, rating))
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewOk {
    pub success: bool,
    pub intervals: PreviewSet,
}

impl PreviewOk {
    pub fn new(intervals: PreviewSet) -> Self {
        Self {
            success: true,
            intervals,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplyOk {
    pub success: bool,
    pub card: CardSnapshot,
    pub applied: IntervalPreview,
}

impl ApplyOk {
    pub fn new(card: CardSnapshot, applied: IntervalPreview) -> Self {
        Self {
            success: true,
            card,
            applied,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

pub fn parse_rating(s: &str) -> Option<Rating> {
    match s.to_lowercase().as_str() {
        "1" | "a" | "again" => Some(Rating::Again),
        "2" | "h" | "hard" => Some(Rating::Hard),
        "3" | "g" | "good" => Some(Rating::Good),
        "4" | "e" | "easy" => Some(Rating::Easy),
        _ => None,
    }
}
