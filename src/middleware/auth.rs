use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::AppResult;
use crate::AppState;

/// Resolve the bearer token to an `Identity` and attach it to the request
pub async fn auth_middleware(
    State(state): State<AppState>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let identity = state.gateway.session(auth.token()).await?;
    tracing::debug!(user_id = %identity.user_id, "Authenticated request");
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
