// Session restore and authentication guards for question routes
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use crate::auth::Claims;
use crate::{AppError, AppState};

const SESSION_COOKIE: &str = "token";

/// Bearer token from `Authorization`, falling back to the session cookie
fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers.get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        headers.get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, token)| token)
            .filter(|token| !token.is_empty())
    })
}

/// Attaches `Claims` to the request when a valid session token is present.
/// Requests without one continue anonymously.
pub async fn restore_user(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = session_token(request.headers())
        .map(|token| app_state.auth_service.verify_token(token));

    match claims {
        Some(Ok(claims)) => {
            tracing::debug!("Restored session for user {}", claims.sub);
            request.extensions_mut().insert(claims);
        }
        Some(Err(e)) => tracing::debug!("Ignoring session token: {}", e),
        None => {}
    }

    next.run(request).await
}

/// Rejects requests that `restore_user` left anonymous
pub async fn require_auth(request: Request, next: Next) -> Result<Response, AppError> {
    if request.extensions().get::<Claims>().is_none() {
        return Err(AppError::AuthError("Authentication required".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_is_preferred() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("token=def"));

        assert_eq!(session_token(&headers), Some("abc"));
    }

    #[test]
    fn test_cookie_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; token=def; lang=en"));

        assert_eq!(session_token(&headers), Some("def"));
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));

        assert_eq!(session_token(&headers), None);
    }
}
