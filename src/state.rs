use std::sync::Arc;

use crate::auth::session::SessionStore;
use crate::config::ClientConfig;
use crate::http::ApiClient;

/// Everything a screen needs: configuration, the session and the client bound to it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ClientConfig>,
    pub session: SessionStore,
    pub api: ApiClient,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = ClientConfig::from_env()?;
        Ok(Self::from_parts(config, SessionStore::new())?)
    }

    pub fn from_parts(config: ClientConfig, session: SessionStore) -> crate::error::Result<Self> {
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            config: Arc::new(config),
            session,
            api,
        })
    }

    /// A state whose client points at a closed local port.
    #[cfg(test)]
    pub fn fake() -> Self {
        let config = ClientConfig::for_base_url("http://127.0.0.1:9".parse().expect("static url"));
        Self::from_parts(config, SessionStore::new()).expect("client builds")
    }
}
