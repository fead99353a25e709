#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use axum::{async_trait, extract::{FromRequestParts, State}, http::{request::Parts, Request}, middleware::Next, response::Response};

use crate::{error::ApiError, models::session::{parseSessionId, SessionClaims}, services::appState::AppState};

//Resolves the session behind the Authorization header and stores its claims in the request extensions.
//Never rejects: endpoints that need a caller ask for it with the CurrentUser extractor.
pub async fn sessionLayer(State(appState): State<AppState>, mut req: Request<axum::body::Body>, next: Next<axum::body::Body>) -> Response {
    let sessionId = req.headers().get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(parseSessionId)
        .map(str::to_string);

    if let Some(sessionId) = sessionId {
        match appState.sessions.resolve(&sessionId).await {
            Ok(Some(claims)) => {
                tracing::debug!(userId = claims.UserId, "session resolved");
                req.extensions_mut().insert(claims);
            },
            Ok(None) => tracing::debug!("unknown or expired session"),
            Err(err) => tracing::error!(error = %err, "session lookup failed")
        }
    }

    return next.run(req).await;
}

//Authenticated caller. Rejects with 401 before the route body runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        return parts.extensions.get::<SessionClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized);
    }
}
