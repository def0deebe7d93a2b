use crate::core::airports::AirportDirectory;
use crate::core::detector::classify;
use crate::core::fetcher::FareFetcher;
use crate::core::notifier::Notifier;
use crate::core::routes::RouteRegistry;
use crate::core::store::PriceStore;
use crate::core::version::VersionResolver;
use crate::domain::model::ApiVersion;
use crate::domain::ports::{MessageSender, Storage};
use crate::utils::error::Result;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub routes_file: String,
    pub prices_file: String,
    pub route_delay: Duration,
    pub check_interval: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub checked: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Completed(PassSummary),
    /// 路線清單讀不到，整輪跳過
    Skipped { reason: String },
}

/// 監控主迴圈：版本 → 逐條查價 → 比對 → 通知 → 一次寫回
pub struct PriceMonitor<S: Storage + Clone, M: MessageSender> {
    resolver: VersionResolver,
    fetcher: FareFetcher,
    notifier: Notifier<M>,
    airports: AirportDirectory,
    routes: RouteRegistry<S>,
    store: PriceStore<S>,
    settings: MonitorSettings,
    api_version: ApiVersion,
}

impl<S: Storage + Clone, M: MessageSender> PriceMonitor<S, M> {
    pub fn new(
        storage: S,
        resolver: VersionResolver,
        fetcher: FareFetcher,
        notifier: Notifier<M>,
        airports: AirportDirectory,
        settings: MonitorSettings,
        initial_version: ApiVersion,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            notifier,
            airports,
            routes: RouteRegistry::new(storage.clone(), settings.routes_file.clone()),
            store: PriceStore::new(storage, settings.prices_file.clone()),
            settings,
            api_version: initial_version,
        }
    }

    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// One full pass. Only a persistence fault is returned as an error.
    pub async fn run_pass(&mut self) -> Result<PassOutcome> {
        self.resolver.refresh(&mut self.api_version).await;
        tracing::info!("🔄 Using API version {}", self.api_version);

        let routes = match self.routes.load().await {
            Ok(routes) => routes,
            Err(e) => {
                tracing::error!("❌ Cannot load routes: {}", e);
                return Ok(PassOutcome::Skipped {
                    reason: e.to_string(),
                });
            }
        };

        let prior = self.store.load().await?;
        let mut working = prior.clone();
        let mut summary = PassSummary::default();
        let total = routes.len();

        for (idx, route) in routes.iter().enumerate() {
            let route_id = route.id();
            let description = self.airports.describe_route(route);
            tracing::info!(
                "🕑 Checking route {}/{}: {} ({})",
                idx + 1,
                total,
                description,
                route_id
            );
            summary.checked += 1;

            match self.fetcher.fetch(&self.api_version, route).await {
                Err(e) => {
                    tracing::error!("❌ {}: {}", route_id, e);
                    summary.failed += 1;
                    self.notifier
                        .notify_fetch_failure(&description, route.depart_date)
                        .await;
                }
                Ok(observation) => {
                    let previous = prior.get(&route_id);
                    let outcome = classify(&route_id, &observation, previous);
                    if outcome.is_reportable() {
                        summary.changed += 1;
                        self.notifier
                            .notify_change(
                                &description,
                                route.depart_date,
                                &observation,
                                previous,
                                outcome,
                            )
                            .await;
                    } else {
                        summary.unchanged += 1;
                        tracing::info!("🔹 Price unchanged for {}", description);
                    }
                    working.insert(&route_id, observation);
                }
            }

            if idx + 1 < total {
                tokio::time::sleep(self.settings.route_delay).await;
            }
        }

        self.store.commit(&working).await?;

        if summary.changed == 0 {
            tracing::info!("✅ No price changes");
        }
        tracing::info!(
            "Pass finished: {} checked, {} changed, {} unchanged, {} failed",
            summary.checked,
            summary.changed,
            summary.unchanged,
            summary.failed
        );

        Ok(PassOutcome::Completed(summary))
    }

    /// Runs passes forever; returns only when state can no longer be persisted.
    pub async fn run_forever(&mut self) -> Result<()> {
        tracing::info!("🚀 Starting fare monitoring");
        loop {
            self.run_pass().await?;

            tracing::info!(
                "⏳ Next check in {} minutes (at {})",
                self.settings.check_interval.as_secs() / 60,
                next_check_label(self.settings.check_interval)
            );
            tokio::time::sleep(self.settings.check_interval).await;
        }
    }
}

/// Wall-clock time of the next pass, or `later` when it falls outside chrono's range.
fn next_check_label(interval: Duration) -> String {
    chrono::Duration::from_std(interval)
        .ok()
        .and_then(|delta| chrono::Local::now().checked_add_signed(delta))
        .map(|next| next.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "later".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_check_label_within_range() {
        let label = next_check_label(Duration::from_secs(3600));
        assert_eq!(label.len(), "2025-11-10 12:00:00".len());
    }

    #[test]
    fn test_next_check_label_out_of_range_does_not_panic() {
        assert_eq!(next_check_label(Duration::from_secs(u64::MAX)), "later");
        assert_eq!(
            next_check_label(Duration::from_secs(1_000_000_000_000 * 60)),
            "later"
        );
    }
}
