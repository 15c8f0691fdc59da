//! Request extractors whose rejections use the API's JSON error body.
//!
//! Drop-in replacements for `axum::Json` and `axum::extract::Query`: a body or
//! query string that fails to parse becomes `HttpError::BadRequest` instead of
//! axum's plain-text rejection.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::HttpError;

/// JSON request body or response payload.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(HttpError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Deserialized query string.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(HttpError))]
pub struct Query<T>(pub T);

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Limit {
        #[allow(dead_code)]
        limit: u32,
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let req = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"limit":"many"}"#))
            .unwrap();
        let err = Json::<Limit>::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, HttpError::BadRequest(ref m) if m.contains("limit")));
    }

    #[tokio::test]
    async fn malformed_query_is_bad_request() {
        let (mut parts, ()) = Request::builder()
            .uri("/?limit=abc")
            .body(())
            .unwrap()
            .into_parts();
        let err = Query::<Limit>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
