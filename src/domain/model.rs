use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 升級前使用的 API 版本
pub const DEFAULT_API_VERSION: &str = "27.36.0";

fn default_adults() -> u32 {
    1
}

/// 單一追蹤路線（`routes.json` 的一筆）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
    #[serde(default = "default_adults")]
    pub adults: u32,
}

impl Route {
    pub fn new(origin: &str, destination: &str, depart_date: NaiveDate) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            depart_date,
            adults: default_adults(),
        }
    }

    pub fn id(&self) -> RouteId {
        RouteId {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            depart_date: self.depart_date,
        }
    }
}

/// Passenger count is deliberately not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId {
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
}

impl RouteId {
    /// 持久化用的 key，例如 `OTP-VIE-2025-11-10`
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.origin,
            self.destination,
            self.depart_date.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    #[serde(rename = "price")]
    pub amount: f64,
    pub currency: String,
}

impl PriceObservation {
    pub fn new(amount: f64, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// 路線 key → 最近一次觀察到的價格
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceState {
    entries: BTreeMap<String, PriceObservation>,
}

impl PriceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, route: &RouteId) -> Option<&PriceObservation> {
        self.entries.get(&route.key())
    }

    pub fn insert(&mut self, route: &RouteId, observation: PriceObservation) {
        self.entries.insert(route.key(), observation);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    NoPrior,
    Unchanged,
    Increased,
    Decreased,
}

impl ChangeOutcome {
    /// `Unchanged` 以外都要通知
    pub fn is_reportable(self) -> bool {
        !matches!(self, ChangeOutcome::Unchanged)
    }
}

/// 上游 URL 中的版本段，例如 `27.36.0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion(String);

impl ApiVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::new(DEFAULT_API_VERSION)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
