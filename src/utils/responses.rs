//! HTTP response construction
//!
//! One place for the response shapes the handlers use, so error bodies and
//! redirects stay consistent across the surface. User-visible behavior is
//! always an inline validation message, a redirect, or a structured JSON
//! payload, never a raw error.

use actix_web::{cookie::Cookie, http::header, HttpResponse};
use serde_json::json;

/// Unified response builder for the handler layer
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// 400 with an inline, user-facing validation message: `{"message": ...}`
    #[must_use]
    pub fn validation_failed(message: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(json!({ "message": message }))
    }

    /// 401 for requests without a valid session
    #[must_use]
    pub fn unauthorized() -> HttpResponse {
        HttpResponse::Unauthorized().json(json!({
            "error": "unauthorized",
            "message": "Authentication is required to access this resource"
        }))
    }

    /// 500 with a generic body; the underlying cause stays in the logs
    #[must_use]
    pub fn server_error() -> HttpResponse {
        HttpResponse::InternalServerError().json(json!({
            "error": "server_error",
            "message": "An internal server error occurred"
        }))
    }

    /// 307 Temporary Redirect, preserving the request method
    #[must_use]
    pub fn temporary_redirect(location: &str) -> HttpResponse {
        HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, location.to_string()))
            .finish()
    }

    /// 200 with JSON content
    #[must_use]
    pub fn ok_json<T: serde::Serialize>(data: &T) -> HttpResponse {
        HttpResponse::Ok().json(data)
    }

    /// 200 with JSON content and a cookie attached
    #[must_use]
    pub fn ok_json_with_cookie<T: serde::Serialize>(
        data: &T,
        cookie: Cookie<'static>,
    ) -> HttpResponse {
        HttpResponse::Ok().cookie(cookie).json(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_failed_shape() {
        let response = ResponseBuilder::validation_failed("Invalid email address or username.");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_temporary_redirect_preserves_method_semantics() {
        let response = ResponseBuilder::temporary_redirect("/register?email=amy%40example.com");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/register?email=amy%40example.com")
        );
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            ResponseBuilder::unauthorized().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ResponseBuilder::server_error().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
