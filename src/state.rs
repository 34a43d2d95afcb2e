use std::sync::Arc;

use crate::{client::RestClient, config::AppConfig, pending::PendingWrites, status::StatusChannel};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: RestClient,
    pub status: StatusChannel,
    pub pending: PendingWrites,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let status = StatusChannel::new(config.console.status_decay());
        let client = RestClient::new(&config.api, status.clone());
        let pending = PendingWrites::new(config.console.submit_policy);
        Arc::new(Self {
            config,
            client,
            status,
            pending,
        })
    }
}
