use crate::domain::model::ApiVersion;
use crate::domain::ports::UserAgentSource;
use crate::utils::error::{MonitorError, Result};
use regex::Regex;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// 從 buildnumber 頁面找出目前的 API 版本
pub struct VersionResolver {
    client: Client,
    discovery_url: String,
    pattern: Regex,
    user_agents: Arc<dyn UserAgentSource>,
}

impl VersionResolver {
    /// `api_base_url` is the host the version is embedded under, e.g.
    /// `https://be.wizzair.com` matches `https://be.wizzair.com/27.36.0`.
    pub fn new(
        discovery_url: &str,
        api_base_url: &str,
        timeout: Duration,
        user_agents: Arc<dyn UserAgentSource>,
    ) -> Result<Self> {
        let pattern = format!(
            r"{}/(\d+\.\d+\.\d+)",
            regex::escape(api_base_url.trim_end_matches('/'))
        );
        let pattern = Regex::new(&pattern).map_err(|e| MonitorError::ConfigValidationError {
            field: "api.base_url".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            discovery_url: discovery_url.to_string(),
            pattern,
            user_agents,
        })
    }

    pub async fn resolve(&self) -> Result<ApiVersion> {
        let response = self
            .client
            .get(&self.discovery_url)
            .header(reqwest::header::USER_AGENT, self.user_agents.next_user_agent())
            .send()
            .await
            .map_err(|e| MonitorError::VersionResolution {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonitorError::VersionResolution {
                message: format!("discovery endpoint returned {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MonitorError::VersionResolution {
                message: e.to_string(),
            })?;

        self.extract(&body)
    }

    fn extract(&self, body: &str) -> Result<ApiVersion> {
        self.pattern
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| ApiVersion::new(m.as_str()))
            .ok_or_else(|| MonitorError::VersionResolution {
                message: "version pattern not found in discovery response".to_string(),
            })
    }

    /// Updates `current` in place; on failure the last known version stays.
    pub async fn refresh(&self, current: &mut ApiVersion) -> bool {
        match self.resolve().await {
            Ok(version) if version != *current => {
                tracing::info!("🔄 API version updated: {} → {}", current, version);
                *current = version;
                true
            }
            Ok(_) => {
                tracing::info!("🔄 API version is up to date: {}", current);
                true
            }
            Err(e) => {
                tracing::error!("❌ {} (keeping {})", e, current);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::user_agents::RandomUserAgentPool;
    use httpmock::prelude::*;

    fn resolver(server: &MockServer, api_base: &str) -> VersionResolver {
        VersionResolver::new(
            &server.url("/buildnumber"),
            api_base,
            Duration::from_secs(5),
            Arc::new(RandomUserAgentPool::default()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_extracts_version() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/buildnumber");
            then.status(200)
                .body("SSR https://be.wizzair.com/27.40.1 build 1234");
        });

        let version = resolver(&server, "https://be.wizzair.com")
            .resolve()
            .await
            .unwrap();
        assert_eq!(version.as_str(), "27.40.1");
        mock.assert();
    }

    #[test]
    fn test_pattern_requires_configured_host() {
        let server = MockServer::start();
        let resolver = resolver(&server, "https://be.wizzair.com");

        assert!(resolver.extract("https://other.example.com/27.40.1").is_err());
        assert!(resolver.extract("https://bexwizzair.com/27.40.1").is_err());
        assert!(resolver.extract("https://be.wizzair.com/27.40").is_err());
    }

    #[tokio::test]
    async fn test_refresh_updates_version() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/buildnumber");
            then.status(200).body("SSR https://be.wizzair.com/28.0.0");
        });

        let mut current = ApiVersion::default();
        assert!(resolver(&server, "https://be.wizzair.com").refresh(&mut current).await);
        assert_eq!(current.as_str(), "28.0.0");
    }

    #[tokio::test]
    async fn test_refresh_keeps_version_on_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/buildnumber");
            then.status(503);
        });

        let mut current = ApiVersion::new("27.36.0");
        assert!(!resolver(&server, "https://be.wizzair.com").refresh(&mut current).await);
        assert_eq!(current.as_str(), "27.36.0");
    }

    #[tokio::test]
    async fn test_refresh_keeps_version_when_pattern_missing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/buildnumber");
            then.status(200).body("maintenance");
        });

        let mut current = ApiVersion::new("27.36.0");
        let r = resolver(&server, "https://be.wizzair.com");
        assert!(matches!(
            r.resolve().await,
            Err(MonitorError::VersionResolution { .. })
        ));
        assert!(!r.refresh(&mut current).await);
        assert_eq!(current.as_str(), "27.36.0");
    }
}
