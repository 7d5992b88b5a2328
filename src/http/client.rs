//! Authenticated HTTP client.
//!
//! Request lifecycle:
//!
//! ```text
//! Pending --2xx/other--> Success | Failure
//! Pending --401, not retried--> Refreshing --ok--> Retried --> Success | Failure
//! Pending --401, retried--> Failure
//! Refreshing --refresh fails--> LoggedOut + Failure
//! ```
//!
//! With single-flight enabled, concurrent 401s wait on one refresh mutex.
//! A waiter whose request went out before the session changed reuses the
//! outcome of the refresh that already happened instead of issuing another.

use std::sync::Arc;

use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::request::{ApiRequest, Body};
use crate::auth::dto::LoginResponse;
use crate::auth::session::SessionStore;
use crate::config::{AuthConfig, ClientConfig};
use crate::error::{ApiError, Result};

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: Url,
    auth: AuthConfig,
    session: SessionStore,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: config.base_url.clone(),
                auth: config.auth.clone(),
                session,
                refresh_lock: Mutex::new(()),
            }),
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.inner.auth
    }

    fn url(&self, path: &str) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    async fn dispatch(&self, req: &ApiRequest, token: Option<&str>) -> Result<reqwest::Response> {
        let mut url = self.url(&req.path)?;
        if !req.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&req.query);
        }
        let mut rb = self.inner.http.request(req.method.clone(), url);
        if req.authorized {
            if let Some(token) = token {
                rb = rb.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
        }
        rb = match &req.body {
            Body::Empty => rb,
            Body::Json(value) => rb.json(value),
            Body::Multipart(_) => match req.build_form() {
                Some(form) => rb.multipart(form),
                None => rb,
            },
        };
        let res = rb.send().await?;
        debug!(
            method = %req.method,
            path = %req.path,
            status = %res.status(),
            retried = req.retried,
            "response"
        );
        Ok(res)
    }

    /// Sends `req`, refreshing the session and resending once on a 401.
    pub async fn execute(&self, mut req: ApiRequest) -> Result<reqwest::Response> {
        let session = &self.inner.session;
        let epoch = session.epoch();
        let token = session.access_token();

        let res = self.dispatch(&req, token.as_deref()).await?;
        if res.status() != StatusCode::UNAUTHORIZED || !req.authorized {
            return into_success(res).await;
        }

        let original = error_from(res).await;
        if req.retried {
            warn!(path = %req.path, "unauthorized after retry; giving up");
            return Err(original);
        }

        match self.recover_unauthorized(epoch).await {
            Ok(Some(new_token)) => {
                req.retried = true;
                let res = self.dispatch(&req, Some(&new_token)).await?;
                into_success(res).await
            }
            Ok(None) => Err(original),
            Err(e) => {
                warn!(error = %e, path = %req.path, "silent refresh failed");
                Err(original)
            }
        }
    }

    pub async fn send_json<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T> {
        let res = self.execute(req).await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends `req` and ignores whatever the body contains.
    pub async fn send_unit(&self, req: ApiRequest) -> Result<()> {
        self.execute(req).await?;
        Ok(())
    }

    /// Returns the token to resend with, or `None` when the session was cleared.
    async fn recover_unauthorized(&self, sent_epoch: u64) -> Result<Option<String>> {
        if !self.inner.auth.single_flight_refresh {
            return self.refresh().await.map(|r| Some(r.access_token));
        }

        let _guard = self.inner.refresh_lock.lock().await;
        let session = &self.inner.session;
        if session.epoch() != sent_epoch {
            debug!(sent_epoch, epoch = session.epoch(), "session changed while waiting; reusing");
            return Ok(session.access_token());
        }
        self.refresh().await.map(|r| Some(r.access_token))
    }

    /// Calls the refresh endpoint. Success updates the session, failure clears it.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<LoginResponse> {
        let req = ApiRequest::post(self.inner.auth.refresh_path.clone())
            .json(&serde_json::json!({}))?
            .anonymous();
        let outcome = async {
            let res = self.dispatch(&req, None).await?;
            let res = into_success(res).await?;
            let bytes = res.bytes().await?;
            Ok::<LoginResponse, ApiError>(serde_json::from_slice(&bytes)?)
        }
        .await;

        match outcome {
            Ok(login) => {
                self.inner.session.login_success(login.clone());
                info!("access token refreshed");
                Ok(login)
            }
            Err(e) => {
                self.inner.session.logout();
                Err(e)
            }
        }
    }
}

async fn into_success(res: reqwest::Response) -> Result<reqwest::Response> {
    if res.status().is_success() {
        Ok(res)
    } else {
        Err(error_from(res).await)
    }
}

async fn error_from(res: reqwest::Response) -> ApiError {
    let status = res.status();
    match res.text().await {
        Ok(body) => ApiError::from_status(status, body),
        Err(e) => ApiError::Transport(e),
    }
}
