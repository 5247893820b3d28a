pub mod ai;
pub mod config;
pub mod manager;
pub mod rentals;
pub mod transcript;
pub mod types;
pub mod widget;

pub use config::Config;
pub use manager::{ConversationManager, FALLBACK_REPLY, TurnPhase};
pub use transcript::Transcript;
pub use widget::{ChatWidget, Renderer};
