use crate::domain::model::Route;
use crate::domain::ports::Storage;
use crate::utils::error::{MonitorError, Result};

/// 讀取 `routes.json`；每一輪重新讀一次，修改路線不需重啟
pub struct RouteRegistry<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> RouteRegistry<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    /// Any failure to produce a route list is reported as missing configuration.
    pub async fn load(&self) -> Result<Vec<Route>> {
        let bytes = self.storage.read_file(&self.file_name).await.map_err(|e| {
            tracing::debug!("Reading {} failed: {}", self.file_name, e);
            MonitorError::MissingConfigError {
                field: self.file_name.clone(),
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| MonitorError::ConfigValidationError {
            field: self.file_name.clone(),
            message: format!("Invalid route list: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_routes_in_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("routes.json"),
            r#"[
                {"origin": "OTP", "destination": "VIE", "depart_date": "2025-11-10"},
                {"origin": "CLJ", "destination": "LTN", "depart_date": "2025-12-01", "adults": 2}
            ]"#,
        )
        .unwrap();

        let registry = RouteRegistry::new(LocalStorage::new(dir.path()), "routes.json");
        let routes = registry.load().await.unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].origin, "OTP");
        assert_eq!(routes[0].adults, 1);
        assert_eq!(routes[1].destination, "LTN");
        assert_eq!(routes[1].adults, 2);
    }

    #[tokio::test]
    async fn test_missing_routes_file() {
        let dir = TempDir::new().unwrap();
        let registry = RouteRegistry::new(LocalStorage::new(dir.path()), "routes.json");

        let result = registry.load().await;
        assert!(matches!(
            result,
            Err(MonitorError::MissingConfigError { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_route_date() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("routes.json"),
            r#"[{"origin": "OTP", "destination": "VIE", "depart_date": "10/11/2025"}]"#,
        )
        .unwrap();
        let registry = RouteRegistry::new(LocalStorage::new(dir.path()), "routes.json");

        assert!(registry.load().await.is_err());
    }
}
