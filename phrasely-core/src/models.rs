use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    New,
    Learning,
    Relearning,
    Review,
}

/// Scheduling portion of a card snapshot. `short_term_step_index` defaults
/// to 0 when absent and is bounds-checked against the active ladder before
/// any indexing happens.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SchedulerSnapshot {
    pub state: CardState,
    pub due_at: DateTime<Utc>,
    #[serde(default)]
    pub stability: Option<f64>,
    #[serde(default)]
    pub difficulty: Option<f64>,
    #[serde(default)]
    pub interval_ms: i64,
    #[serde(default)]
    pub short_term_step_index: Option<usize>,
}

/// Read-only card snapshot consumed by the preview engine. Owned by the
/// external card store; never mutated here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CardSnapshot {
    pub id: String,
    pub scheduler: SchedulerSnapshot,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub lapses: u32,
}

impl CardSnapshot {
    pub fn new(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            scheduler: SchedulerSnapshot {
                state: CardState::New,
                due_at: now,
                stability: None,
                difficulty: None,
                interval_ms: 0,
                short_term_step_index: None,
            },
            reviews: 0,
            lapses: 0,
        }
    }
}

fn default_retention() -> f64 {
    0.9
}

fn default_learning_steps() -> Vec<String> {
    vec!["1m".to_string(), "10m".to_string()]
}

fn default_relearning_steps() -> Vec<String> {
    vec!["10m".to_string()]
}

fn default_enabled() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PreviewConfig {
    /// Target retention probability, passed through to the estimator.
    #[serde(default = "default_retention")]
    pub request_retention: f64,
    /// Short-term steps for new cards, first-to-last (duration tokens).
    #[serde(default = "default_learning_steps")]
    pub learning_steps: Vec<String>,
    /// Short-term steps for lapsed cards, first-to-last (duration tokens).
    #[serde(default = "default_relearning_steps")]
    pub relearning_steps: Vec<String>,
    /// Reserved: the default estimator applies no jitter.
    #[serde(default)]
    pub enable_fuzz: bool,
    /// When false, every rating skips the step ladder entirely.
    #[serde(default = "default_enabled")]
    pub enable_short_term: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            request_retention: default_retention(),
            learning_steps: default_learning_steps(),
            relearning_steps: default_relearning_steps(),
            enable_fuzz: false,
            enable_short_term: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct IntervalPreview {
    pub due_at: DateTime<Utc>,
    pub interval_ms: i64,
    pub label: String,
}

/// One preview per rating. A successful computation always carries all four.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PreviewSet {
    pub again: IntervalPreview,
    pub hard: IntervalPreview,
    pub good: IntervalPreview,
    pub easy: IntervalPreview,
}

impl PreviewSet {
    pub fn get(&self, rating: Rating) -> &IntervalPreview {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }
}
