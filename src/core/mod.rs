pub mod airports;
pub mod detector;
pub mod fetcher;
pub mod monitor;
pub mod notifier;
pub mod routes;
pub mod store;
pub mod version;

pub use crate::domain::model::{ApiVersion, ChangeOutcome, PriceObservation, PriceState, Route};
pub use crate::domain::ports::{MessageSender, Storage, UserAgentSource};
pub use crate::utils::error::Result;
