//! Membership application submission endpoint

use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::debug;

use crate::core::application::ApplicationRequest;
use crate::server::state::AppState;

/// Configure application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").route("/apply", web::post().to(submit_application)));
}

/// Raw form fields as the page posts them
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyForm {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub reason: String,
    /// "true" when the page holds a CONNECT session
    #[serde(rename = "isAuthenticated", default)]
    pub is_authenticated: Option<String>,
    /// Trust level as a decimal string, when known
    #[serde(rename = "trustLevel", default)]
    pub trust_level: Option<String>,
}

impl From<ApplyForm> for ApplicationRequest {
    fn from(form: ApplyForm) -> Self {
        Self {
            user_id: form.user_id.trim().to_string(),
            reason: form.reason.trim().to_string(),
            is_authenticated: form.is_authenticated.as_deref() == Some("true"),
            trust_level: form.trust_level.and_then(|v| v.trim().parse().ok()),
        }
    }
}

/// Handle one form submission
///
/// Always answers HTTP 200 with a `{status, message}` body; failures are
/// expressed in the body, never as an HTTP error, so the page can render them.
pub async fn submit_application(
    state: web::Data<AppState>,
    web::Form(form): web::Form<ApplyForm>,
) -> ActixResult<HttpResponse> {
    debug!(user_id = %form.user_id, "Application submitted");

    let request: ApplicationRequest = form.into();
    let result = state.handler.handle(request).await;

    Ok(HttpResponse::Ok().json(result))
}
