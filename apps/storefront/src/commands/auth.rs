//! # Auth Commands
//!
//! ## Remember Me
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  login(remember = true)                                                 │
//! │     └── server returns remember_token ──► RememberedLogin saved         │
//! │                                           (token + expiry, never the    │
//! │                                            password)                    │
//! │                                                                         │
//! │  next start: restore_session()                                          │
//! │     ├── saved session? ──────────────► reuse its bearer token          │
//! │     ├── remembered login, not expired ─► POST auth/token-login         │
//! │     │      ├── 2xx ──► new session saved                               │
//! │     │      └── 401 ──► remembered login forgotten                      │
//! │     └── nothing ─────────────────────► signed out                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use playzone_client::{
    ApiClient, ClientConfig, ClientError, LoginResponse, RegisterRequest, RememberedLogin, Session,
};
use playzone_core::validation::{
    validate_email, validate_password, validate_person_name, validate_phone, validate_username,
};
use playzone_core::{UserProfile, ValidationError};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Notice, NoticeResult};
use crate::state::SessionState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    /// Username or email address.
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    fn validate(&self) -> NoticeResult<RegisterRequest> {
        validate_person_name(&self.name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        validate_password(&self.password)?;
        if self.password != self.password_confirmation {
            return Err(Notice::validation("Passwords do not match"));
        }

        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Signs in and, when asked, remembers the login for the next start.
pub async fn login(
    api: &ApiClient,
    session: &SessionState,
    config: &ClientConfig,
    form: &LoginForm,
) -> NoticeResult<UserProfile> {
    debug!(remember = form.remember, "login command");

    validate_username(&form.username)?;
    if form.password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        }
        .into());
    }

    let username = form.username.trim();
    let response = match api.login(username, &form.password, form.remember).await {
        Ok(response) => response,
        Err(ClientError::Unauthorized) => {
            return Err(Notice::validation("Invalid username or password"))
        }
        Err(e) => return Err(e.into()),
    };
    let profile = response.user.clone();

    if form.remember {
        remember(session, config, username, &response, Utc::now());
    } else if let Err(e) = session.forget_remembered() {
        warn!(error = %e, "Could not forget remembered login");
    }

    session.sign_in(Session {
        token: response.token,
        profile: profile.clone(),
    })?;
    Ok(profile)
}

fn remember(
    session: &SessionState,
    config: &ClientConfig,
    username: &str,
    response: &LoginResponse,
    now: DateTime<Utc>,
) {
    let Some(token) = &response.remember_token else {
        warn!("Remember me requested but server issued no token");
        return;
    };

    let login = RememberedLogin {
        username: username.to_string(),
        token: token.clone(),
        expires_at: response
            .remember_expires_at
            .unwrap_or_else(|| now + config.remember_for()),
    };
    // failing to remember must not fail the login itself
    if let Err(e) = session.remember(&login) {
        warn!(error = %e, "Could not save remembered login");
    }
}

/// Picks up where the last run left off.
///
/// Returns the signed-in profile, or `None` when the user has to log in.
pub async fn restore_session(
    api: &ApiClient,
    session: &SessionState,
    config: &ClientConfig,
) -> NoticeResult<Option<UserProfile>> {
    if let Some(current) = session.current() {
        api.set_token(current.token).await;
        return Ok(Some(current.profile));
    }

    let now = Utc::now();
    let Some(remembered) = session.remembered(now) else {
        return Ok(None);
    };

    match api.login_with_token(&remembered.token).await {
        Ok(response) => {
            info!("Signed in from remembered login");
            let profile = response.user.clone();
            if response.remember_token.is_some() {
                remember(session, config, &remembered.username, &response, now);
            }
            session.sign_in(Session {
                token: response.token,
                profile: profile.clone(),
            })?;
            Ok(Some(profile))
        }
        Err(ClientError::Unauthorized) => {
            info!("Remembered login rejected by server");
            if let Err(e) = session.forget_remembered() {
                warn!(error = %e, "Could not forget remembered login");
            }
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Creates an account. The user still has to log in afterwards.
pub async fn register(api: &ApiClient, form: &RegisterForm) -> NoticeResult<UserProfile> {
    debug!("register command");
    let request = form.validate()?;
    let profile = api.register(&request).await?;
    info!("Account registered");
    Ok(profile)
}

/// Signs out here and on the server, and forgets any remembered login.
pub async fn logout(api: &ApiClient, session: &SessionState) -> NoticeResult<()> {
    debug!("logout command");
    api.logout().await?;
    session.sign_out()?;
    session.forget_remembered()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoticeCode;
    use crate::test_support::api_for;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use chrono::Duration;
    use playzone_client::MemorySessionStore;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn session_state() -> SessionState {
        SessionState::load(Arc::new(MemorySessionStore::new()))
    }

    fn login_body(remember_token: Option<&str>) -> Value {
        json!({
            "data": {
                "token": "session-tok",
                "user": { "role": "customer", "name": "Budi", "email": "budi@example.com", "phone": "081234567890" },
                "remember_token": remember_token
            }
        })
    }

    fn form(remember: bool) -> LoginForm {
        LoginForm {
            username: " budi ".into(),
            password: "rahasia123".into(),
            remember,
        }
    }

    #[tokio::test]
    async fn test_login_remembers_token_not_password() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["username"], "budi");
                Json(login_body(Some("remember-tok")))
            }),
        );
        let api = api_for(router).await;
        let session = session_state();
        let config = ClientConfig::new();

        let profile = login(&api, &session, &config, &form(true)).await.unwrap();
        assert_eq!(profile.name, "Budi");
        assert!(session.is_signed_in());

        let remembered = session.remembered(Utc::now()).unwrap();
        assert_eq!(remembered.token, "remember-tok");
        assert_eq!(remembered.username, "budi");
        assert!(remembered.expires_at > Utc::now() + Duration::days(29));
    }

    #[tokio::test]
    async fn test_login_without_remember_forgets_previous() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { Json(login_body(None)) }),
        );
        let api = api_for(router).await;
        let session = session_state();
        session
            .remember(&RememberedLogin {
                username: "old".into(),
                token: "old-tok".into(),
                expires_at: Utc::now() + Duration::days(3),
            })
            .unwrap();

        login(&api, &session, &ClientConfig::new(), &form(false))
            .await
            .unwrap();
        assert!(session.remembered(Utc::now()).is_none());
    }

    #[tokio::test]
    async fn test_login_validates_before_sending() {
        let api = api_for(Router::new()).await;
        let bad = LoginForm {
            username: "".into(),
            password: "x".into(),
            remember: false,
        };

        let notice = login(&api, &session_state(), &ClientConfig::new(), &bad)
            .await
            .unwrap_err();
        assert_eq!(notice.code, NoticeCode::ValidationError);
    }

    #[tokio::test]
    async fn test_wrong_password_is_a_form_error() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { StatusCode::UNAUTHORIZED }),
        );
        let api = api_for(router).await;
        let session = session_state();

        let notice = login(&api, &session, &ClientConfig::new(), &form(false))
            .await
            .unwrap_err();
        assert_eq!(notice.code, NoticeCode::ValidationError);
        assert_eq!(notice.message, "Invalid username or password");
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_restore_from_remembered_token() {
        let router = Router::new().route(
            "/api/auth/token-login",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["token"], "remember-tok");
                Json(login_body(None))
            }),
        );
        let api = api_for(router).await;
        let session = session_state();
        session
            .remember(&RememberedLogin {
                username: "budi".into(),
                token: "remember-tok".into(),
                expires_at: Utc::now() + Duration::days(3),
            })
            .unwrap();

        let profile = restore_session(&api, &session, &ClientConfig::new())
            .await
            .unwrap();
        assert_eq!(profile.unwrap().email, "budi@example.com");
        assert!(api.is_authenticated().await);
        assert!(session.is_signed_in());
    }

    #[tokio::test]
    async fn test_rejected_remembered_token_is_forgotten() {
        let router = Router::new().route(
            "/api/auth/token-login",
            post(|| async { StatusCode::UNAUTHORIZED }),
        );
        let api = api_for(router).await;
        let session = session_state();
        session
            .remember(&RememberedLogin {
                username: "budi".into(),
                token: "revoked".into(),
                expires_at: Utc::now() + Duration::days(3),
            })
            .unwrap();

        let restored = restore_session(&api, &session, &ClientConfig::new())
            .await
            .unwrap();
        assert!(restored.is_none());
        assert!(session.remembered(Utc::now()).is_none());
    }

    #[tokio::test]
    async fn test_restore_reuses_saved_session() {
        let api = api_for(Router::new()).await;
        let session = crate::test_support::signed_in();

        let restored = restore_session(&api, &session, &ClientConfig::new())
            .await
            .unwrap();
        assert!(restored.is_some());
        assert!(api.is_authenticated().await);
    }

    #[test]
    fn test_register_form_checks() {
        let mut form = RegisterForm {
            name: "Sari Dewi".into(),
            email: "sari@example.com".into(),
            phone: "081298765432".into(),
            password: "rahasia123".into(),
            password_confirmation: "rahasia124".into(),
        };
        assert_eq!(form.validate().unwrap_err().message, "Passwords do not match");

        form.password_confirmation = "rahasia123".into();
        assert_eq!(form.validate().unwrap().name, "Sari Dewi");

        form.email = "not-an-email".into();
        assert_eq!(
            form.validate().unwrap_err().code,
            NoticeCode::ValidationError
        );
    }

    #[tokio::test]
    async fn test_logout_forgets_everything() {
        let router = Router::new().route("/api/auth/logout", post(|| async { Json(json!({})) }));
        let api = api_for(router).await;
        let session = crate::test_support::signed_in();
        session
            .remember(&RememberedLogin {
                username: "sari".into(),
                token: "remember-tok".into(),
                expires_at: Utc::now() + Duration::days(3),
            })
            .unwrap();

        logout(&api, &session).await.unwrap();
        assert!(!session.is_signed_in());
        assert!(session.remembered(Utc::now()).is_none());
    }
}
