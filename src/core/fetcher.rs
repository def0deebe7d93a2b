use crate::domain::model::{ApiVersion, PriceObservation, Route};
use crate::domain::ports::UserAgentSource;
use crate::utils::error::{FetchError, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const SELLABLE_PRICE_TYPE: &str = "price";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FareChartRequest {
    is_rescue_fare: bool,
    adult_count: u32,
    child_count: u32,
    day_interval: u32,
    wdc: bool,
    is_flight_change: bool,
    flight_list: Vec<FlightQuery>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FlightQuery {
    departure_station: String,
    arrival_station: String,
    date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FareChartResponse {
    // 逐筆解析，鄰近日期的壞資料不影響目標日期
    #[serde(default)]
    outbound_flights: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FareChartEntry {
    #[serde(default)]
    price_type: Option<String>,
    #[serde(default)]
    price: Option<FareChartPrice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FareChartPrice {
    amount: Option<f64>,
    currency_code: Option<String>,
}

/// 每條路線一次 farechart 查詢，不重試
pub struct FareFetcher {
    client: Client,
    base_url: String,
    site_origin: String,
    day_interval: u32,
    user_agents: Arc<dyn UserAgentSource>,
}

impl FareFetcher {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        day_interval: u32,
        user_agents: Arc<dyn UserAgentSource>,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            site_origin: "https://wizzair.com".to_string(),
            day_interval,
            user_agents,
        })
    }

    fn endpoint(&self, version: &ApiVersion) -> String {
        format!("{}/{}/Api/asset/farechart", self.base_url, version)
    }

    pub async fn fetch(
        &self,
        version: &ApiVersion,
        route: &Route,
    ) -> std::result::Result<PriceObservation, FetchError> {
        let target_date = format!("{}T00:00:00", route.depart_date.format("%Y-%m-%d"));
        let payload = FareChartRequest {
            is_rescue_fare: false,
            adult_count: route.adults,
            child_count: 0,
            day_interval: self.day_interval,
            wdc: false,
            is_flight_change: false,
            flight_list: vec![FlightQuery {
                departure_station: route.origin.clone(),
                arrival_station: route.destination.clone(),
                date: target_date.clone(),
            }],
        };

        let response = self
            .client
            .post(self.endpoint(version))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.user_agents.next_user_agent())
            .header(ORIGIN, self.site_origin.as_str())
            .header(REFERER, format!("{}/", self.site_origin))
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Transport {
                status: Some(status.as_u16()),
                message: body.chars().take(200).collect(),
            });
        }

        let chart: FareChartResponse =
            response.json().await.map_err(|e| FetchError::Transport {
                status: Some(status.as_u16()),
                message: format!("Invalid fare chart body: {}", e),
            })?;
        tracing::debug!(
            "Fare chart for {} → {} has {} entries",
            route.origin,
            route.destination,
            chart.outbound_flights.as_ref().map_or(0, |entries| entries.len())
        );

        select_price(chart.outbound_flights.as_deref().unwrap_or(&[]), &target_date)
    }
}

fn select_price(
    entries: &[serde_json::Value],
    target_date: &str,
) -> std::result::Result<PriceObservation, FetchError> {
    let raw = entries
        .iter()
        .find(|entry| entry.get("date").and_then(|d| d.as_str()) == Some(target_date))
        .ok_or_else(|| FetchError::NotFound {
            date: target_date.to_string(),
        })?;

    let entry = FareChartEntry::deserialize(raw).map_err(|e| {
        tracing::debug!("Malformed fare chart entry for {}: {}", target_date, e);
        FetchError::Unavailable {
            date: target_date.to_string(),
            price_type: "malformed entry".to_string(),
        }
    })?;

    let price_type = entry.price_type.as_deref().unwrap_or("none");
    if price_type != SELLABLE_PRICE_TYPE {
        return Err(FetchError::Unavailable {
            date: target_date.to_string(),
            price_type: price_type.to_string(),
        });
    }

    match &entry.price {
        Some(FareChartPrice {
            amount: Some(amount),
            currency_code: Some(currency),
        }) if *amount >= 0.0 && !currency.is_empty() => {
            tracing::debug!("Found price for {}: {} {}", target_date, amount, currency);
            Ok(PriceObservation::new(*amount, currency))
        }
        _ => Err(FetchError::Unavailable {
            date: target_date.to_string(),
            price_type: "incomplete price".to_string(),
        }),
    }
}
