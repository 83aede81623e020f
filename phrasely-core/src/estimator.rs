use crate::models::Rating;

pub const LAPSE_DAYS: f64 = 1.0;
pub const FIRST_HARD_DAYS: f64 = 1.0;
pub const FIRST_GOOD_DAYS: f64 = 3.0;
pub const FIRST_EASY_DAYS: f64 = 7.0;
pub const HARD_FACTOR: f64 = 1.2;
pub const GOOD_FACTOR: f64 = 2.5;
pub const EASY_FACTOR: f64 = 3.0;

/// Everything a long-term model may consult for one rating of one card.
/// `stability`/`difficulty` and `request_retention` are carried for
/// forgetting-curve estimators; the default model ignores them.
#[derive(Clone, Copy, Debug)]
pub struct EstimatorInput {
    pub rating: Rating,
    pub current_interval_days: f64,
    pub stability: Option<f64>,
    pub difficulty: Option<f64>,
    pub request_retention: f64,
}

/// Seam for the long-term memory model. Implementations return the next
/// interval in days; the scheduler owns the conversion to milliseconds and
/// the due-time arithmetic.
pub trait IntervalEstimator {
    fn estimate_next_interval(&self, input: &EstimatorInput) -> f64;
}

/// Default long-term model: multiplicative growth keyed by rating, with a
/// lapse resetting to the minimum interval. First-interval constants apply
/// to cards with no prior long-term interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct MultiplicativeEstimator;

impl IntervalEstimator for MultiplicativeEstimator {
    fn estimate_next_interval(&self, input: &EstimatorInput) -> f64 {
        let current = input.current_interval_days;
        match input.rating {
            Rating::Again => LAPSE_DAYS,
            Rating::Hard => {
                if current == 0.0 {
                    FIRST_HARD_DAYS
                } else {
                    current * HARD_FACTOR
                }
            }
            Rating::Good => {
                if current == 0.0 {
                    FIRST_GOOD_DAYS
                } else {
                    current * GOOD_FACTOR
                }
            }
            Rating::Easy => {
                if current == 0.0 {
                    FIRST_EASY_DAYS
                } else {
                    current * EASY_FACTOR
                }
            }
        }
    }
}
