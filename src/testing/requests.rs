//! Canned requests for handler tests

use actix_web::cookie::Cookie;
use actix_web::test::TestRequest;

/// Builder for the requests the auth surface receives
pub struct RequestBuilder;

impl RequestBuilder {
    /// The sign-in form POST, as the login page submits it
    #[must_use]
    pub fn sign_in(login: &str, browser_supports_passkeys: bool) -> TestRequest {
        TestRequest::post()
            .uri("/auth/sign_in")
            .insert_header(("Host", "links.example"))
            .set_form([
                ("login", login.to_string()),
                (
                    "browserSupportsPasskeys",
                    browser_supports_passkeys.to_string(),
                ),
            ])
    }

    #[must_use]
    pub fn sign_out(cookie: Option<Cookie<'static>>) -> TestRequest {
        let req = TestRequest::post().uri("/auth/sign_out");
        match cookie {
            Some(cookie) => req.cookie(cookie),
            None => req,
        }
    }

    #[must_use]
    pub fn list_sessions(cookie: Option<Cookie<'static>>) -> TestRequest {
        let req = TestRequest::get().uri("/account/sessions");
        match cookie {
            Some(cookie) => req.cookie(cookie),
            None => req,
        }
    }
}
