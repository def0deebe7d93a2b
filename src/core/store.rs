use crate::domain::model::PriceState;
use crate::domain::ports::Storage;
use crate::utils::error::{MonitorError, Result};

/// 上次觀察到的價格，整份讀、整份寫
pub struct PriceStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> PriceStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    /// A missing or unparsable file yields an empty state; any other read fault is a
    /// `Persistence` error.
    pub async fn load(&self) -> Result<PriceState> {
        let bytes = match self.storage.read_file(&self.file_name).await {
            Ok(bytes) => bytes,
            Err(MonitorError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No stored prices at {}, starting fresh", self.file_name);
                return Ok(PriceState::new());
            }
            Err(MonitorError::IoError(e)) => {
                return Err(MonitorError::Persistence {
                    path: self.file_name.clone(),
                    source: e,
                })
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_slice::<PriceState>(&bytes) {
            Ok(state) => {
                tracing::debug!("Loaded {} stored prices", state.len());
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Stored prices in {} are not valid JSON ({}), starting fresh",
                    self.file_name,
                    e
                );
                Ok(PriceState::new())
            }
        }
    }

    pub async fn commit(&self, state: &PriceState) -> Result<()> {
        let data = serde_json::to_vec_pretty(state)?;
        self.storage
            .write_file(&self.file_name, &data)
            .await
            .map_err(|e| match e {
                MonitorError::IoError(source) => MonitorError::Persistence {
                    path: self.file_name.clone(),
                    source,
                },
                other => other,
            })?;
        tracing::debug!("Committed {} prices to {}", state.len(), self.file_name);
        Ok(())
    }
}
