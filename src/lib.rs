pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod handlers;
pub mod shell;
pub mod state;
pub mod types;
pub mod view;

pub use crate::client::EngineClient;
pub use crate::config::Config;
pub use crate::error::{ClipboardError, UnfoldError};
pub use crate::state::AppState;
pub use crate::types::*;
pub use crate::view::{Effect, Msg, RequestState, View, ViewState};
