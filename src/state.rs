use crate::config::Config;
use reqwest::Client;

/// Shared, read-only proxy state handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: Client,
}
