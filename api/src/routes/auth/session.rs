use actix_web::HttpResponse;

use crate::dto::auth::SessionResponse;
use crate::middleware::session::SessionContext;

use ed_shared::types::response::ApiResponse;

/// Handler for GET /api/v1/auth/session
///
/// Returns the current session. The route is guarded by the session
/// middleware, which already ran the activity check and re-issued the
/// cookies, so the handler only reports what the middleware injected.
pub async fn current_session(context: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(SessionResponse::from(&context.0)))
}
