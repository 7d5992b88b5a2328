use tracing::{info, instrument, warn};

use super::dto::{LoginRequest, LoginResponse, SignupRequest, User};
use super::validation::{check_login, check_signup};
use crate::error::{ApiError, Result};
use crate::http::{ApiClient, ApiRequest};

#[instrument(skip(api, password))]
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<User> {
    let email = check_login(email, password)?;
    let req = ApiRequest::post(api.auth_config().login_path.clone())
        .json(&LoginRequest {
            email,
            password: password.to_string(),
        })?
        .anonymous();
    let res: LoginResponse = api.send_json(req).await?;
    let user = start_session(api, res)?;
    info!(user_no = user.user_no, "user logged in");
    Ok(user)
}

/// Registers a new account and logs it in. Offered when login answers 404.
#[instrument(skip(api, password))]
pub async fn signup(
    api: &ApiClient,
    email: &str,
    password: &str,
    username: Option<&str>,
) -> Result<User> {
    let email = check_signup(email, password, username)?;
    let req = ApiRequest::post(api.auth_config().signup_path.clone())
        .json(&SignupRequest {
            email,
            password: password.to_string(),
            username: username.map(str::to_string),
        })?
        .anonymous();
    let res: LoginResponse = api.send_json(req).await?;
    let user = start_session(api, res)?;
    info!(user_no = user.user_no, "user signed up");
    Ok(user)
}

fn start_session(api: &ApiClient, res: LoginResponse) -> Result<User> {
    let user = res
        .user
        .clone()
        .ok_or_else(|| ApiError::Validation("login response without user".into()))?;
    api.session().login_success(res);
    Ok(user)
}

/// Logs out on the server; the local session is cleared either way.
#[instrument(skip(api))]
pub async fn logout(api: &ApiClient) {
    let req = ApiRequest::post(api.auth_config().logout_path.clone());
    if let Err(e) = api.send_unit(req).await {
        warn!(error = %e, "logout request failed; clearing session anyway");
    }
    api.session().logout();
}

/// Restores the session from the refresh cookie at startup.
#[instrument(skip(api))]
pub async fn restore_session(api: &ApiClient) -> Option<User> {
    match api.refresh().await {
        Ok(_) => api.session().user(),
        Err(e) => {
            info!(error = %e, "no session to restore");
            None
        }
    }
}
