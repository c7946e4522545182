//! CONNECT sign-in endpoints
//!
//! Authorization-code flow against the fixed CONNECT issuer. The resulting
//! session lives only in a signed cookie.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, web};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{Session, SessionManager};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result as GatewayResult};

/// Session cookie name
pub const SESSION_COOKIE: &str = "cardhub_session";
/// Short-lived cookie carrying the OAuth state nonce across the redirect
const STATE_COOKIE: &str = "cardhub_oauth_state";

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::get().to(login))
            .route("/callback", web::get().to(callback))
            .route("/session", web::get().to(current_session))
            .route("/logout", web::post().to(logout)),
    );
}

/// Redirect the visitor to the CONNECT authorization endpoint
pub async fn login(state: web::Data<AppState>) -> GatewayResult<HttpResponse> {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    let authorize_url = state
        .connect
        .authorize_url(&state.config.oauth_redirect_uri(), &nonce)?;

    let state_cookie = Cookie::build(STATE_COOKIE, nonce)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::minutes(10))
        .finish();

    debug!("Redirecting to CONNECT authorization endpoint");
    Ok(HttpResponse::Found()
        .insert_header(("Location", authorize_url))
        .cookie(state_cookie)
        .finish())
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub state: String,
}

/// Complete the code exchange and set the session cookie
pub async fn callback(
    state: web::Data<AppState>,
    query: web::Query<CallbackQuery>,
    req: HttpRequest,
) -> GatewayResult<HttpResponse> {
    let expected = req
        .cookie(STATE_COOKIE)
        .ok_or_else(|| GatewayError::session("Missing OAuth state cookie"))?;
    if expected.value() != query.state {
        warn!("OAuth state mismatch");
        return Err(GatewayError::session("OAuth state mismatch"));
    }

    let session = state
        .connect
        .exchange_code(&query.code, &state.config.oauth_redirect_uri())
        .await?;
    let token = state.sessions.issue_token(&session)?;

    let session_cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(
            SessionManager::DEFAULT_EXPIRATION as i64,
        ))
        .finish();

    let mut removal = Cookie::new(STATE_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    debug!(sub = %session.subject_id, "CONNECT sign-in completed");
    Ok(HttpResponse::Found()
        .insert_header(("Location", "/"))
        .cookie(session_cookie)
        .cookie(removal)
        .finish())
}

/// Session claims exposed to the page
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Session>,
}

/// Current session for the page, if the cookie verifies
pub async fn current_session(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let session = req
        .cookie(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.verify_token(cookie.value()).ok());

    HttpResponse::Ok().json(SessionView {
        authenticated: session.is_some(),
        user: session,
    })
}

/// Clear the session cookie
pub async fn logout() -> HttpResponse {
    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    HttpResponse::Ok()
        .cookie(removal)
        .json(ApiResponse::success("signed out"))
}
