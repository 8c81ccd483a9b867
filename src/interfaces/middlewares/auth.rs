use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{infrastructure::auth::session::SESSION_COOKIE, AppState};

/// Admin id resolved by the session gate, available to gated handlers via
/// request extensions.
#[derive(Debug, Clone, Copy)]
pub struct AdminId(pub i64);

/// Mounted on the admin scope in `routes.rs`: every request routed into the
/// scope must carry a valid session cookie or is rejected before the handler
/// runs. Routing happens after path normalization, so the guard cannot be
/// sidestepped with an un-normalized path.
pub struct SessionGate;

impl<S> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SessionGateService {
            service: Rc::new(service),
        })
    }
}

pub struct SessionGateService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for SessionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = match req.app_data::<web::Data<AppState>>() {
                Some(state) => state,
                None => {
                    tracing::error!("AppState missing in session gate");
                    return Ok(custom_error_response(req, HttpResponse::InternalServerError().json(serde_json::json!({
                        "error": "Internal server error"
                    }))));
                }
            };

            let token = match req.request().cookie(SESSION_COOKIE) {
                Some(cookie) => cookie.value().to_string(),
                None => {
                    tracing::warn!(path = %req.path(), "missing session cookie");
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Unauthorized"
                    }))));
                }
            };

            let admin_id = match state.auth.authorize(&token) {
                Ok(id) => id,
                Err(_) => {
                    tracing::warn!(path = %req.path(), "invalid or expired session");
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Unauthorized"
                    }))));
                }
            };

            req.extensions_mut().insert(AdminId(admin_id));
            service.call(req).await
        })
    }
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}
