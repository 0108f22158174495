use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use moodline_core::s3_keys;

/// Bearer-token middleware.
///
/// Extracts `Authorization: Bearer <token>` and inserts `AuthUser` into the
/// request extensions. The token is the user identity; it is not
/// cryptographically verified here.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let sub = {
        let auth_header = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or(StatusCode::UNAUTHORIZED)?;

        if s3_keys::validate_user_id(token).is_err() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        token.to_string()
    };

    req.extensions_mut().insert(AuthUser { sub });

    Ok(next.run(req).await)
}

/// Authenticated user.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: String,
}
