use futures::{
    future::{ok, ready, LocalBoxFuture, Ready},
    FutureExt,
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    FromRequest, HttpMessage,
};
use chrono::{serde::ts_seconds, DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::{
        auth_utils::decode_token,
        errors::{AuthError, TodoApiError},
    },
    models::user_model::SlimUser,
};

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub email: String,
    pub id: String,
    #[serde(with = "ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl From<&SlimUser> for Claims {
    fn from(user: &SlimUser) -> Self {
        use std::ops::Add;

        Claims {
            email: user.email.clone(),
            id: user.id.to_string(),
            exp: Utc::now().add(chrono::Duration::days(1)),
        }
    }
}

/// Identity extracted from a verified token, attached to the
/// request by `TokenAuth`
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub email: String,
    pub id: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(c: Claims) -> Self {
        AuthenticatedUser {
            email: c.email,
            id: c.id,
        }
    }
}

pub struct Authenticated(AuthenticatedUser);

/// Implementing `FromRequest` allows to extract `AuthenticatedUser`
/// from any incoming request where `TokenAuth` middleware is used
impl FromRequest for Authenticated {
    type Error = TodoApiError;
    // Using `Ready` Future as we don't do any
    // async operation in the `from_request` function
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        // Get cloned value of the authenticated user from request
        let value = req.extensions().get::<AuthenticatedUser>().cloned();

        let result = match value {
            Some(v) => Ok(Authenticated(v)),
            None => Err(TodoApiError::AuthError(AuthError::InvalidToken)),
        };

        futures::future::ready(result)
    }
}

/// Deref to `AuthenticatedUser` so handlers can use `.` notation
/// directly on `Authenticated`
impl std::ops::Deref for Authenticated {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct TokenAuth;

pub struct TokenAuthMiddleware<S> {
    service: S,
}

/// Implement `Transform` to convert the `TokenAuth` marker into `TokenAuthMiddleware`
impl<S, B> Transform<S, ServiceRequest> for TokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;

    type Error = actix_web::Error;

    type InitError = ();

    type Transform = TokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(TokenAuthMiddleware { service })
    }
}

impl<S, B> Service<ServiceRequest> for TokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;

    type Error = actix_web::Error;

    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let error: TodoApiError;

        match req.headers().get("Authorization") {
            Some(auth_header) => match decode_token(auth_header) {
                Ok(claims) => {
                    {
                        let mut extensions = req.extensions_mut();

                        extensions.insert::<AuthenticatedUser>(claims.into());
                    }

                    // Verified, continue to next middleware/handler
                    return Box::pin(
                        self.service
                            .call(req)
                            .map(|res| res.map(|res| res.map_into_left_body())),
                    );
                }
                Err(err) => {
                    error = TodoApiError::AuthError(err);
                }
            },
            None => {
                error = TodoApiError::AuthError(AuthError::NoAuthorizationHeader);
            }
        }

        Box::pin(ready(Ok(
            req.into_response(error.to_response().map_into_right_body())
        )))
    }
}
