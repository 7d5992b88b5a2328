use std::time::Duration;

use anyhow::Context;
use url::Url;

use crate::ingredients::expiry::NEAR_EXPIRY_DAYS;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub login_path: String,
    pub logout_path: String,
    pub signup_path: String,
    pub refresh_path: String,
    /// Share one refresh call between concurrent 401s.
    pub single_flight_refresh: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: "/auth/login".into(),
            logout_path: "/auth/logout".into(),
            signup_path: "/auth/signup".into(),
            refresh_path: "/auth/tokens/refresh".into(),
            single_flight_refresh: true,
        }
    }
}

impl AuthConfig {
    /// Reads `KITCHEN_{LOGIN,LOGOUT,SIGNUP,REFRESH}_PATH` and
    /// `KITCHEN_SINGLE_FLIGHT_REFRESH`, keeping defaults for anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            login_path: lookup("KITCHEN_LOGIN_PATH").unwrap_or(defaults.login_path),
            logout_path: lookup("KITCHEN_LOGOUT_PATH").unwrap_or(defaults.logout_path),
            signup_path: lookup("KITCHEN_SIGNUP_PATH").unwrap_or(defaults.signup_path),
            refresh_path: lookup("KITCHEN_REFRESH_PATH").unwrap_or(defaults.refresh_path),
            single_flight_refresh: lookup("KITCHEN_SINGLE_FLIGHT_REFRESH")
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(defaults.single_flight_refresh),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub auth: AuthConfig,
    pub request_timeout: Option<Duration>,
    pub near_expiry_days: i64,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let raw_base = std::env::var("KITCHEN_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8081".into());
        let base_url = Url::parse(&raw_base)
            .with_context(|| format!("KITCHEN_API_BASE_URL is not a valid url: {raw_base}"))?;

        let auth = AuthConfig::from_lookup(|key| std::env::var(key).ok());

        let request_timeout = std::env::var("KITCHEN_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        let near_expiry_days = std::env::var("KITCHEN_NEAR_EXPIRY_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(NEAR_EXPIRY_DAYS);

        Ok(Self {
            base_url,
            auth,
            request_timeout,
            near_expiry_days,
        })
    }

    pub fn for_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            auth: AuthConfig::default(),
            request_timeout: None,
            near_expiry_days: NEAR_EXPIRY_DAYS,
        }
    }
}
