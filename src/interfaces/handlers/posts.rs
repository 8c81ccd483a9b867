use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::post::{NewPostRequest, UpdateDisplayTimeRequest, UpdateStatusRequest},
    errors::AppError,
    middlewares::auth::AdminId,
    AppState,
};

/// Public feed: published posts with their photo URLs in attachment order.
#[instrument(skip(state))]
#[get("/posts")]
pub async fn published_posts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let posts = state.posts.list_published().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(state, data, admin))]
#[post("/add-post")]
pub async fn create_post(
    state: web::Data<AppState>,
    data: web::Json<NewPostRequest>,
    admin: web::ReqData<AdminId>,
) -> Result<impl Responder, AppError> {
    let response = state.posts.create_post(data.into_inner()).await?;
    tracing::info!(admin_id = admin.0, slug = %response.slug, "post created");
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state))]
#[get("/posts")]
pub async fn list_posts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let posts = state.posts.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(state))]
#[get("/posts/{slug}")]
pub async fn get_post(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.posts.get_post(&slug).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(state, data))]
#[put("/posts/{slug}/status")]
pub async fn update_status(
    slug: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateStatusRequest>,
) -> Result<impl Responder, AppError> {
    state.posts.update_status(&slug, &data.status).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Status updated"})))
}

#[instrument(skip(state, data))]
#[put("/posts/{slug}/display-time")]
pub async fn update_display_time(
    slug: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateDisplayTimeRequest>,
) -> Result<impl Responder, AppError> {
    state.posts.update_display_time(&slug, data.display_time).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Display time updated"})))
}

#[instrument(skip(state, admin))]
#[delete("/posts/{slug}")]
pub async fn delete_post(
    slug: web::Path<String>,
    state: web::Data<AppState>,
    admin: web::ReqData<AdminId>,
) -> Result<impl Responder, AppError> {
    state.posts.delete_post(&slug).await?;
    tracing::info!(admin_id = admin.0, slug = %slug, "post deleted");
    Ok(HttpResponse::NoContent().finish())
}
