// Adapters layer: concrete implementations of the domain ports.

pub mod telegram;
pub mod user_agents;
