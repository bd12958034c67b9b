//! HS256 tokens and the bearer-auth middleware.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("Authorization header must be `Bearer <token>`")]
    MalformedHeader,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("token lifetime of {ttl_secs}s overflows the expiry time")]
    ExpiryOverflow { ttl_secs: u64 },
}

impl AuthError {
    pub fn is_expired(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken(e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature)
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::ExpiryOverflow { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        error(status, self.to_string())
    }
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Signing and verification keys for one shared secret.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, subject: &str, role: &str) -> Result<String, AuthError> {
        self.issue_at(subject, role, now_secs())
    }

    /// Issues a token as if the clock read `issued_at`.
    pub fn issue_at(&self, subject: &str, role: &str, issued_at: u64) -> Result<String, AuthError> {
        let ttl_secs = self.ttl.as_secs();
        let exp = issued_at
            .checked_add(ttl_secs)
            .ok_or(AuthError::ExpiryOverflow { ttl_secs })?;
        self.sign(&Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: issued_at,
            exp,
        })
    }

    /// Signs `claims` as given, expiry included.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(decode::<Claims>(token, &self.decoding, &self.validation)?.claims)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Rejects requests without a valid token with 401. On success the
/// verified [`Claims`] are stored in the request extensions, where
/// handlers pick them up with `Extension<Claims>`.
///
/// Install with `middleware::from_fn_with_state(keys, require_auth)`.
pub async fn require_auth(
    State(keys): State<Arc<JwtKeys>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let verified = bearer_token(req.headers()).and_then(|token| keys.verify(token));
    match verified {
        Ok(claims) => {
            debug!(sub = %claims.sub, "token accepted");
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(err) => {
            debug!(%err, "token rejected");
            Err(err)
        }
    }
}

/// Allows the request only when the authenticated role matches. Must run
/// inside [`require_auth`].
///
/// Install with `middleware::from_fn_with_state("admin", require_role)`.
pub async fn require_role(State(role): State<&'static str>, req: Request, next: Next) -> Response {
    let allowed = req.extensions().get::<Claims>().map(|claims| claims.role == role);
    match allowed {
        Some(true) => next.run(req).await,
        Some(false) => error(StatusCode::FORBIDDEN, format!("requires role {role}")),
        None => error(StatusCode::UNAUTHORIZED, "not authenticated"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    fn keys() -> JwtKeys {
        JwtKeys::from_secret(b"test-secret", Duration::from_secs(60))
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_issue_then_verify() {
        let keys = keys();
        let token = keys.issue("alice", "admin").unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys();
        let token = keys.issue_at("alice", "admin", now_secs() - 3600).unwrap();
        let err = keys.verify(&token).unwrap_err();
        assert!(err.is_expired(), "{err}");
    }

    #[test]
    fn test_explicit_past_expiry_rejected_for_any_ttl() {
        let keys = JwtKeys::from_secret(b"test-secret", Duration::from_secs(100_000_000_000));
        let now = now_secs();
        let token = keys
            .sign(&Claims {
                sub: "alice".into(),
                role: "admin".into(),
                iat: now - 120,
                exp: now - 60,
            })
            .unwrap();
        assert!(keys.verify(&token).unwrap_err().is_expired());
    }

    #[test]
    fn test_huge_ttl_is_an_error_not_a_panic() {
        let keys = JwtKeys::from_secret(b"test-secret", Duration::from_secs(u64::MAX));
        let err = keys.issue("alice", "admin").unwrap_err();
        assert!(matches!(err, AuthError::ExpiryOverflow { ttl_secs: u64::MAX }));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys().issue("alice", "admin").unwrap();
        let other = JwtKeys::from_secret(b"another-secret", Duration::from_secs(60));
        let err = other.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
        assert!(!err.is_expired());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert!(matches!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingHeader)));
        assert!(matches!(bearer_token(&headers("Basic Zm9v")), Err(AuthError::MalformedHeader)));
        assert!(matches!(bearer_token(&headers("Bearer ")), Err(AuthError::MalformedHeader)));
    }

    #[tokio::test]
    async fn test_middleware_guards_nested_router() {
        let keys = Arc::new(keys());
        let admin = Router::new()
            .route("/me", get(|Extension(claims): Extension<Claims>| async move { claims.sub }))
            .route_layer(from_fn_with_state("admin", require_role))
            .route_layer(from_fn_with_state(Arc::clone(&keys), require_auth));
        let router = Router::new().nest("/admin", admin);

        let call = |token: Option<String>| {
            let router = router.clone();
            async move {
                let mut req = axum::http::Request::builder().uri("/admin/me");
                if let Some(token) = token {
                    req = req.header(AUTHORIZATION, format!("Bearer {token}"));
                }
                router.oneshot(req.body(Body::empty()).unwrap()).await.unwrap().status()
            }
        };

        assert_eq!(call(None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(call(Some(keys.issue("bob", "viewer").unwrap())).await, StatusCode::FORBIDDEN);
        assert_eq!(call(Some(keys.issue("alice", "admin").unwrap())).await, StatusCode::OK);
    }
}
