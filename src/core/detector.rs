use crate::domain::model::{ChangeOutcome, PriceObservation, RouteId};

/// 價差在這個範圍內（含）視為沒變，單位是該路線幣別
pub const PRICE_EPSILON: f64 = 0.01;

// Absorbs binary rounding of two-decimal amounts, e.g. 100.01 - 100.00.
const FLOAT_SLACK: f64 = 1e-9;

pub fn classify(
    route: &RouteId,
    new: &PriceObservation,
    prior: Option<&PriceObservation>,
) -> ChangeOutcome {
    let Some(prior) = prior else {
        tracing::debug!("{}: first observation", route);
        return ChangeOutcome::NoPrior;
    };

    if prior.currency != new.currency {
        tracing::warn!(
            "{}: currency changed {} → {}, comparing amounts as-is",
            route,
            prior.currency,
            new.currency
        );
    }

    let diff = new.amount - prior.amount;
    if diff.abs() <= PRICE_EPSILON + FLOAT_SLACK {
        ChangeOutcome::Unchanged
    } else if diff > 0.0 {
        ChangeOutcome::Increased
    } else {
        ChangeOutcome::Decreased
    }
}
