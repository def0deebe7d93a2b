use crate::adapters::telegram::TelegramSender;
use crate::adapters::user_agents::RandomUserAgentPool;
use crate::config::cli::LocalStorage;
use crate::config::toml_config::MonitorConfig;
use crate::core::airports::AirportDirectory;
use crate::core::fetcher::FareFetcher;
use crate::core::monitor::{MonitorSettings, PriceMonitor};
use crate::core::notifier::Notifier;
use crate::core::version::VersionResolver;
use crate::domain::model::ApiVersion;
use crate::domain::ports::{MessageSender, UserAgentSource};
use crate::utils::error::{MonitorError, Result};
use std::sync::Arc;

impl From<&MonitorConfig> for MonitorSettings {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            routes_file: config.storage.routes_file.clone(),
            prices_file: config.storage.prices_file.clone(),
            route_delay: config.route_delay(),
            check_interval: config.check_interval(),
        }
    }
}

/// 依配置組出監控器，通知通道由呼叫端決定
pub async fn build_monitor_with_sender<M: MessageSender>(
    config: &MonitorConfig,
    sender: M,
) -> Result<PriceMonitor<LocalStorage, M>> {
    let storage = LocalStorage::new(&config.storage.data_dir);
    let user_agents: Arc<dyn UserAgentSource> = Arc::new(RandomUserAgentPool::new(
        config.api.user_agents.clone().unwrap_or_default(),
    ));

    let resolver = VersionResolver::new(
        &config.api.discovery_url,
        &config.api.base_url,
        config.discovery_timeout(),
        user_agents.clone(),
    )?;
    let fetcher = FareFetcher::new(
        &config.api.base_url,
        config.request_timeout(),
        config.day_interval(),
        user_agents,
    )?;
    let airports = AirportDirectory::load(&storage, &config.storage.airports_file).await;

    Ok(PriceMonitor::new(
        storage,
        resolver,
        fetcher,
        Notifier::new(sender),
        airports,
        MonitorSettings::from(config),
        ApiVersion::new(config.api.default_version.clone()),
    ))
}

pub async fn build_monitor(
    config: &MonitorConfig,
) -> Result<PriceMonitor<LocalStorage, TelegramSender>> {
    let token = config
        .telegram
        .token
        .as_deref()
        .ok_or_else(|| MonitorError::MissingConfigError {
            field: "telegram.token".to_string(),
        })?;
    let chat_id = config
        .telegram
        .chat_id
        .as_deref()
        .ok_or_else(|| MonitorError::MissingConfigError {
            field: "telegram.chat_id".to_string(),
        })?;

    let sender = TelegramSender::new(
        config.telegram_api_base(),
        token,
        chat_id,
        config.telegram_timeout(),
    )?;
    build_monitor_with_sender(config, sender).await
}
