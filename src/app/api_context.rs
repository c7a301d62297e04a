//! Backend client and runtime configuration shared via context.

use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::{self, Config};
use crate::services::ApiClient;

#[derive(Clone)]
pub struct ApiContext {
    pub client: ApiClient,
    pub config: Rc<Config>,
}

/// Initialize API context provider - call once at app root
pub fn use_api_provider() {
    use_context_provider(|| {
        let config = config::load_or_default();
        tracing::info!("Backend at {}", config.api_url);
        ApiContext {
            client: ApiClient::browser(&config),
            config: Rc::new(config),
        }
    });
}

/// Backend client for service calls.
pub fn use_api() -> ApiClient {
    use_context::<ApiContext>().client
}

pub fn use_config() -> Rc<Config> {
    use_context::<ApiContext>().config
}
