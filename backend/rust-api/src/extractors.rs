use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};

use crate::handlers::ApiError;

/// JSON extractor that answers malformed bodies with the API's JSON error payload
/// instead of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                let message = format!("Invalid request body: {}", rejection.body_text());
                tracing::warn!("{}", message);
                Err(ApiError::BadRequest(message).into_response())
            }
        }
    }
}

/// Query-string counterpart of [`AppJson`].
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(AppQuery(value)),
            Err(rejection) => {
                let message = format!("Invalid query string: {}", rejection.body_text());
                tracing::warn!("{}", message);
                Err(ApiError::BadRequest(message).into_response())
            }
        }
    }
}
