use crate::domain::model::Route;
use crate::domain::ports::Storage;
use std::collections::HashMap;

/// 機場代碼 → 城市名稱，查不到就顯示原始代碼
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    names: HashMap<String, String>,
}

impl AirportDirectory {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Never fails: a missing or broken file gives an empty directory.
    pub async fn load<S: Storage>(storage: &S, file_name: &str) -> Self {
        let bytes = match storage.read_file(file_name).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Airport names unavailable ({}), showing raw codes", e);
                return Self::default();
            }
        };

        match serde_json::from_slice::<HashMap<String, String>>(&bytes) {
            Ok(names) => {
                tracing::info!("Loaded {} airport names", names.len());
                Self::new(names)
            }
            Err(e) => {
                tracing::error!("Invalid airport file {}: {}", file_name, e);
                Self::default()
            }
        }
    }

    /// `Bucharest (OTP)` or just `OTP`.
    pub fn describe(&self, code: &str) -> String {
        match self.names.get(code) {
            Some(city) if city != code => format!("{} ({})", city, code),
            _ => code.to_string(),
        }
    }

    pub fn describe_route(&self, route: &Route) -> String {
        format!(
            "{} → {}",
            self.describe(&route.origin),
            self.describe(&route.destination)
        )
    }
}
