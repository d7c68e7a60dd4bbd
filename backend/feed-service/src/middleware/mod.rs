/// HTTP middleware for feed-service
///
/// Resolves the viewer identity from a verified bearer token before any
/// handler runs. Anonymous requests pass through without a `ViewerId`.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

/// Verified viewer identifier stored in request extensions after auth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerId(pub Uuid);

/// Claims accepted from the identity provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Validates `Authorization: Bearer <token>` (HS256) and returns the subject.
pub fn validate_token(token: &str, key: &DecodingKey) -> Result<Uuid, String> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(token, key, &validation)
        .map_err(|e| format!("Invalid or expired token: {}", e))?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| "Invalid user ID".to_string())
}

/// Actix middleware that authenticates the viewer when a bearer token is sent.
///
/// - no `Authorization` header: anonymous request
/// - valid token: `ViewerId` inserted into request extensions
/// - malformed or invalid token: 401
#[derive(Clone)]
pub struct ViewerAuth {
    key: Arc<DecodingKey>,
}

impl ViewerAuth {
    pub fn new(secret: &str) -> Self {
        Self {
            key: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ViewerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ViewerAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ViewerAuthService {
            service: Rc::new(service),
            key: self.key.clone(),
        }))
    }
}

pub struct ViewerAuthService<S> {
    service: Rc<S>,
    key: Arc<DecodingKey>,
}

impl<S, B> Service<ServiceRequest> for ViewerAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let key = self.key.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .map(|h| h.to_str().map(str::to_owned));

            if let Some(header) = auth_header {
                let header =
                    header.map_err(|_| ErrorUnauthorized("Invalid Authorization header"))?;
                let token = header
                    .strip_prefix("Bearer ")
                    .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme"))?;

                let viewer_id = validate_token(token, &key).map_err(ErrorUnauthorized)?;
                req.extensions_mut().insert(ViewerId(viewer_id));
            }

            service.call(req).await
        })
    }
}

/// Extracts the viewer when authenticated; never fails.
#[derive(Debug, Clone, Copy)]
pub struct MaybeViewer(pub Option<ViewerId>);

impl FromRequest for MaybeViewer {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(MaybeViewer(req.extensions().get::<ViewerId>().copied())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "unit-test-secret";

    fn token(sub: &str, exp_offset: Duration, secret: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (Utc::now() + exp_offset).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_subject() {
        let user_id = Uuid::new_v4();
        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let token = token(&user_id.to_string(), Duration::hours(1), SECRET);
        assert_eq!(validate_token(&token, &key), Ok(user_id));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let token = token(&Uuid::new_v4().to_string(), Duration::hours(-2), SECRET);
        assert!(validate_token(&token, &key).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let token = token(&Uuid::new_v4().to_string(), Duration::hours(1), "other");
        assert!(validate_token(&token, &key).is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let token = token("alice", Duration::hours(1), SECRET);
        assert_eq!(validate_token(&token, &key), Err("Invalid user ID".to_string()));
    }
}
