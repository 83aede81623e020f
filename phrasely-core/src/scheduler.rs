use crate::duration::{format_interval, parse_duration};
use crate::errors::CoreError;
use crate::estimator::{EstimatorInput, IntervalEstimator, MultiplicativeEstimator};
use crate::models::{
    CardSnapshot, CardState, IntervalPreview, PreviewConfig, PreviewSet, Rating, MS_PER_DAY,
};
use chrono::{DateTime, Duration, Utc};

pub struct ScheduleOutcome {
    pub updated_card: CardSnapshot,
    pub applied: IntervalPreview,
}

/// Short-term step ladder. `Ok(Some(ms))` schedules at a fixed step;
/// `Ok(None)` means the ladder does not apply and the long-term policy
/// decides. Errors only on an unparsable step token.
pub fn short_term_interval(
    card: &CardSnapshot,
    rating: Rating,
    config: &PreviewConfig,
) -> Result<Option<i64>, CoreError> {
    if !config.enable_short_term {
        return Ok(None);
    }
    match (card.scheduler.state, rating) {
        (CardState::New, Rating::Again) => first_step(&config.learning_steps),
        (CardState::Relearning, Rating::Again) => first_step(&config.relearning_steps),
        (CardState::Learning, Rating::Good | Rating::Easy) => {
            next_step(card, &config.learning_steps)
        }
        (CardState::Relearning, Rating::Good | Rating::Easy) => {
            next_step(card, &config.relearning_steps)
        }
        _ => Ok(None),
    }
}

fn first_step(ladder: &[String]) -> Result<Option<i64>, CoreError> {
    match ladder.first() {
        Some(token) => parse_duration(token).map(Some),
        None => Ok(None),
    }
}

fn next_step(card: &CardSnapshot, ladder: &[String]) -> Result<Option<i64>, CoreError> {
    let index = card.scheduler.short_term_step_index.unwrap_or(0);
    // An index at or past the last step falls through to long-term
    // scheduling; out-of-range indices are never dereferenced.
    match index.checked_add(1).and_then(|next| ladder.get(next)) {
        Some(token) => parse_duration(token).map(Some),
        None => Ok(None),
    }
}

/// Long-term interval in milliseconds for one rating, via the estimator.
pub fn long_term_interval(
    card: &CardSnapshot,
    rating: Rating,
    config: &PreviewConfig,
    estimator: &dyn IntervalEstimator,
) -> i64 {
    let current_interval_days = card.scheduler.interval_ms.max(0) as f64 / MS_PER_DAY as f64;
    let input = EstimatorInput {
        rating,
        current_interval_days,
        stability: card.scheduler.stability,
        difficulty: card.scheduler.difficulty,
        request_retention: config.request_retention,
    };
    let days = estimator.estimate_next_interval(&input);
    (days * MS_PER_DAY as f64).round() as i64
}

/// Computes previews for all four ratings with the default estimator.
/// Pure over its inputs; the card is never mutated.
pub fn compute_previews(
    card: &CardSnapshot,
    now: DateTime<Utc>,
    config: &PreviewConfig,
) -> Result<PreviewSet, CoreError> {
    compute_previews_with(card, now, config, &MultiplicativeEstimator)
}

pub fn compute_previews_with(
    card: &CardSnapshot,
    now: DateTime<Utc>,
    config: &PreviewConfig,
    estimator: &dyn IntervalEstimator,
) -> Result<PreviewSet, CoreError> {
    Ok(PreviewSet {
        again: preview_for(card, Rating::Again, now, config, estimator)?,
        hard: preview_for(card, Rating::Hard, now, config, estimator)?,
        good: preview_for(card, Rating::Good, now, config, estimator)?,
        easy: preview_for(card, Rating::Easy, now, config, estimator)?,
    })
}

fn preview_for(
    card: &CardSnapshot,
    rating: Rating,
    now: DateTime<Utc>,
    config: &PreviewConfig,
    estimator: &dyn IntervalEstimator,
) -> Result<IntervalPreview, CoreError> {
    let interval_ms = match short_term_interval(card, rating, config)? {
        Some(ms) => ms,
        None => long_term_interval(card, rating, config, estimator),
    };
    Ok(IntervalPreview {
        due_at: now + Duration::milliseconds(interval_ms),
        interval_ms,
        label: format_interval(interval_ms),
    })
}

/// Commits one rating: the interval comes from the identical policy
/// dispatch as the preview, and the returned snapshot carries the advanced
/// state machine. The input card is untouched.
pub fn apply_rating(
    card: &CardSnapshot,
    rating: Rating,
    now: DateTime<Utc>,
    config: &PreviewConfig,
) -> Result<ScheduleOutcome, CoreError> {
    apply_rating_with(card, rating, now, config, &MultiplicativeEstimator)
}

pub fn apply_rating_with(
    card: &CardSnapshot,
    rating: Rating,
    now: DateTime<Utc>,
    config: &PreviewConfig,
    estimator: &dyn IntervalEstimator,
) -> Result<ScheduleOutcome, CoreError> {
    let mut updated = card.clone();

    let interval_ms = match short_term_interval(card, rating, config)? {
        Some(ms) => {
            match (card.scheduler.state, rating) {
                // Lapse entry: (re)start at the first step.
                (CardState::New, Rating::Again) => {
                    updated.scheduler.state = CardState::Learning;
                    updated.scheduler.short_term_step_index = Some(0);
                }
                (CardState::Relearning, Rating::Again) => {
                    updated.scheduler.short_term_step_index = Some(0);
                }
                // Advancement within the ladder.
                _ => {
                    let index = card.scheduler.short_term_step_index.unwrap_or(0);
                    updated.scheduler.short_term_step_index = Some(index + 1);
                }
            }
            ms
        }
        None => {
            let ms = long_term_interval(card, rating, config, estimator);
            if rating == Rating::Again {
                if card.scheduler.state == CardState::Review {
                    updated.scheduler.state = CardState::Relearning;
                    updated.lapses += 1;
                }
                // A lapse outside review keeps its state; there is no
                // ladder to climb and nothing to graduate.
            } else {
                updated.scheduler.state = CardState::Review;
            }
            updated.scheduler.short_term_step_index = None;
            updated.scheduler.interval_ms = ms;
            ms
        }
    };

    updated.scheduler.due_at = now + Duration::milliseconds(interval_ms);
    updated.reviews += 1;

    let applied = IntervalPreview {
        due_at: updated.scheduler.due_at,
        interval_ms,
        label: format_interval(interval_ms),
    };
    Ok(ScheduleOutcome {
        updated_card: updated,
        applied,
    })
}
