use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    extract::CookieJar,
    headers::{Authorization, HeaderMapExt, authorization::Bearer},
};
use platewise_core::domain::{
    authentication::{ports::AuthService, value_objects::Identity},
    common::entities::app_errors::CoreError,
};

use super::http::server::{
    api_entities::api_error::ApiError,
    app_state::{AppServices, AppState},
};

pub const SESSION_COOKIE: &str = "session_token";

/// Identity set by [`auth`]; rejects with 401 when the caller is anonymous.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(RequiredIdentity)
            .ok_or(ApiError::Unauthorized)
    }
}

/// Bearer token first, then the session cookie.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>()
        && !bearer.token().trim().is_empty()
    {
        return Some(bearer.token().trim().to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Optional auth middleware: resolves the session and sets [`Identity`] when
/// it is valid. Handlers that need a caller use [`RequiredIdentity`].
/// A rejected session continues anonymously; a failing session store ends
/// the request with 500.
pub async fn auth<S: AppServices>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_session_token(req.headers()) {
        match state.service.authenticate(token).await {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
            }
            Err(CoreError::Unauthenticated) => tracing::debug!("Session rejected"),
            Err(e) => {
                tracing::error!("Session lookup failed: {}", e);
                return ApiError::from(e).into_response();
            }
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use axum::http::{
        HeaderValue,
        header::{AUTHORIZATION, COOKIE},
    };

    use super::*;

    #[test]
    fn test_bearer_takes_precedence_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer header-token"));
        headers.insert(COOKIE, HeaderValue::from_static("session_token=cookie-token"));

        assert_eq!(
            extract_session_token(&headers),
            Some("header-token".to_string())
        );
    }

    #[test]
    fn test_cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session_token=cookie-token"),
        );

        assert_eq!(
            extract_session_token(&headers),
            Some("cookie-token".to_string())
        );
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));

        assert_eq!(extract_session_token(&headers), None);
    }
}
