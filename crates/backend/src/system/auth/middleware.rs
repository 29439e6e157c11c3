use axum::{
    body::Body, extract::Request, http::HeaderMap, http::StatusCode, middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

// Takes `&HeaderMap` rather than `&Request<Body>`: the request body is not
// `Sync`, so a `&Request<Body>` held across the await below would make the
// middleware futures non-`Send`. Headers are all this needs.
async fn claims_from_request(headers: &HeaderMap) -> Result<TokenClaims, StatusCode> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    super::jwt::validate_token(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Middleware that requires a valid JWT
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_from_request(req.headers()).await?;

    // Claims go into request extensions for the handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires the manager gate (managers and admins)
pub async fn require_manager(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_from_request(req.headers()).await?;

    if !claims.role.is_manager() {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires the admin role
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_from_request(req.headers()).await?;

    if !claims.role.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
