use actix_web::{
    cookie::{Cookie, SameSite},
    get, post, web, HttpRequest, HttpResponse, Responder,
};
use tracing::instrument;

use crate::{
    entities::admin::Credentials,
    errors::AppError,
    infrastructure::auth::session::SESSION_COOKIE,
    AppState,
};

#[instrument(skip(state, credentials))]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let token = state.auth.login(credentials.into_inner()).await?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({"message": "Logged in"})))
}

#[instrument(skip(request, state))]
#[post("/logout")]
pub async fn logout(request: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    if let Some(cookie) = request.cookie(SESSION_COOKIE) {
        state.auth.logout(cookie.value());
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    HttpResponse::Ok()
        .cookie(removal)
        .json(serde_json::json!({"message": "Logged out"}))
}

#[instrument(skip(request, state))]
#[get("/me")]
pub async fn me(request: HttpRequest, state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let cookie = request.cookie(SESSION_COOKIE).ok_or(AppError::Unauthorized)?;
    let admin_id = state.auth.authorize(cookie.value())?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"admin_id": admin_id})))
}
