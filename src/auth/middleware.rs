use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::Header,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;

use crate::{
    auth::{Capability, Identity, JwtService},
    errors::{AppError, AppResult},
    middleware::request_id,
    models::domain::Role,
};

/// Per-route gate: resolves the bearer token to an [`Identity`], checks the
/// route's [`Capability`], and only then lets the request reach the handler.
///
/// Attach with the route macro, e.g.
/// `#[put("/api/games/{id}", wrap = "AccessControl::roles(ADMIN_OR_MODERATOR)")]`.
#[derive(Debug, Clone, Copy)]
pub struct AccessControl {
    capability: Capability,
}

impl AccessControl {
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }

    pub fn authenticated() -> Self {
        Self::new(Capability::Authenticated)
    }

    pub fn roles(roles: &'static [Role]) -> Self {
        Self::new(Capability::AnyRole(roles))
    }

    pub fn owner_or_admin(param: &'static str) -> Self {
        Self::new(Capability::OwnerOrAdmin { param })
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessControl
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessControlService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessControlService {
            service: Rc::new(service),
            capability: self.capability,
        }))
    }
}

pub struct AccessControlService<S> {
    service: Rc<S>,
    capability: Capability,
}

impl<S> AccessControlService<S> {
    fn resolve(&self, req: &ServiceRequest) -> AppResult<Identity> {
        let jwt_service = req
            .app_data::<web::Data<JwtService>>()
            .ok_or_else(|| AppError::InternalError("JWT service not configured".to_string()))?;

        let header = Authorization::<Bearer>::parse(req).map_err(|_| {
            AppError::Unauthorized("Missing or malformed bearer token".to_string())
        })?;
        let bearer = header.into_scheme();

        let identity = jwt_service.verify(bearer.token())?;

        let path_value = self
            .capability
            .path_param()
            .and_then(|param| req.match_info().get(param));
        self.capability.authorize(&identity, path_value)?;

        Ok(identity)
    }
}

impl<S, B> Service<ServiceRequest> for AccessControlService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let identity = match self.resolve(&req) {
            Ok(identity) => identity,
            Err(err) => {
                log::info!(
                    "access denied [{}] {} {}: {}",
                    request_id(&req).unwrap_or_default(),
                    req.method(),
                    req.path(),
                    err
                );
                // The handler never runs, so nothing downstream can mutate state.
                return Box::pin(async move { Ok(req.error_response(err).map_into_right_body()) });
            }
        };

        req.extensions_mut().insert(identity);

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<Identity>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(identity)
    }
}
