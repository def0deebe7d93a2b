use crate::domain::model::{ChangeOutcome, PriceObservation};
use crate::domain::ports::MessageSender;
use chrono::NaiveDate;

/// 固定匯率：1 EUR = 4.9 RON
const RON_PER_EUR: f64 = 4.9;
const NO_PRIOR_PLACEHOLDER: &str = "–";

pub fn format_price(observation: &PriceObservation) -> String {
    match observation.currency.as_str() {
        "RON" => format!(
            "{:.2} RON (≈ {:.2} EUR)",
            observation.amount,
            observation.amount / RON_PER_EUR
        ),
        currency => format!("{:.2} {}", observation.amount, currency),
    }
}

/// Telegram HTML 模式只需跳脫 `&`、`<`、`>`
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// First sightings have nothing to compare against and use the "down" arrow.
pub fn direction_indicator(outcome: ChangeOutcome) -> &'static str {
    match outcome {
        ChangeOutcome::Increased => "⬆️",
        ChangeOutcome::Decreased | ChangeOutcome::NoPrior | ChangeOutcome::Unchanged => "⬇️",
    }
}

pub fn change_message(
    route_description: &str,
    date: NaiveDate,
    new: &PriceObservation,
    prior: Option<&PriceObservation>,
    outcome: ChangeOutcome,
) -> String {
    let previous = prior
        .map(format_price)
        .unwrap_or_else(|| NO_PRIOR_PLACEHOLDER.to_string());

    format!(
        "{} <b>{}</b>\nDeparture: <b>{}</b>\nPrice: <b>{}</b>\nPrevious: <b>{}</b>",
        direction_indicator(outcome),
        escape_html(route_description),
        date.format("%Y-%m-%d"),
        format_price(new),
        previous
    )
}

pub fn failure_message(route_description: &str, date: NaiveDate) -> String {
    format!(
        "⚠️ Could not get a price for <b>{}</b> on {}",
        escape_html(route_description),
        date.format("%Y-%m-%d")
    )
}

pub struct Notifier<M: MessageSender> {
    sender: M,
}

impl<M: MessageSender> Notifier<M> {
    pub fn new(sender: M) -> Self {
        Self { sender }
    }

    pub fn sender(&self) -> &M {
        &self.sender
    }

    pub async fn notify_change(
        &self,
        route_description: &str,
        date: NaiveDate,
        new: &PriceObservation,
        prior: Option<&PriceObservation>,
        outcome: ChangeOutcome,
    ) -> bool {
        let text = change_message(route_description, date, new, prior, outcome);
        self.dispatch(&text).await
    }

    pub async fn notify_fetch_failure(&self, route_description: &str, date: NaiveDate) -> bool {
        self.dispatch(&failure_message(route_description, date)).await
    }

    // 送不出去只記錄，不重試也不中斷這一輪
    async fn dispatch(&self, text: &str) -> bool {
        match self.sender.send(text).await {
            Ok(()) => {
                tracing::info!("✅ Notification sent");
                true
            }
            Err(e) => {
                tracing::error!("❌ Notification failed: {}", e);
                false
            }
        }
    }
}
