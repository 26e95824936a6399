//! End-to-end coverage of the sign-in endpoint

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use linkfolio::handlers::sign_in;
use linkfolio::store::IdentityStore;
use linkfolio::testing::{RequestBuilder, TestFixtures};

macro_rules! app {
    ($fixtures:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from($fixtures.store_handle()))
                .app_data(web::Data::new($fixtures.cookie_factory.clone()))
                .route("/auth/sign_in", web::post().to(sign_in)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_malformed_login_gets_inline_message() {
    let fixtures = TestFixtures::new();
    let app = app!(fixtures);

    let resp = test::call_service(
        &app,
        RequestBuilder::sign_in("not-an-email-or-username!!", true).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email address or username.");
}

#[actix_web::test]
async fn test_unknown_email_redirects_to_registration() {
    let fixtures = TestFixtures::new();
    let app = app!(fixtures);

    let resp = test::call_service(
        &app,
        RequestBuilder::sign_in("new@example.com", true).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/register?email=new%40example.com")
    );
}

#[actix_web::test]
async fn test_unknown_username_redirects_to_registration() {
    let fixtures = TestFixtures::new();
    let app = app!(fixtures);

    let resp = test::call_service(&app, RequestBuilder::sign_in("newcomer", false).to_request())
        .await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/register?username=newcomer")
    );
}

#[actix_web::test]
async fn test_user_without_passkeys_gets_email_otp() {
    let fixtures = TestFixtures::new();
    fixtures.seed_user("amy@example.com", "amy").await;
    let app = app!(fixtures);

    // Client passkey support alone must not trigger the webauthn path
    let resp = test::call_service(
        &app,
        RequestBuilder::sign_in("amy@example.com", true).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["authType"], "email-otp");
}

#[actix_web::test]
async fn test_passkey_user_without_client_support_gets_email_otp() {
    let fixtures = TestFixtures::new();
    let user = fixtures.seed_user("amy@example.com", "amy").await;
    fixtures.seed_passkey(&user, vec![7; 16]).await;
    let app = app!(fixtures);

    let resp = test::call_service(
        &app,
        RequestBuilder::sign_in("amy@example.com", false).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["authType"], "email-otp");
}

#[actix_web::test]
async fn test_passkey_user_with_client_support_gets_webauthn_challenge() {
    let fixtures = TestFixtures::new();
    let user = fixtures.seed_user("amy@example.com", "amy").await;
    fixtures.seed_passkey(&user, vec![7; 16]).await;
    let app = app!(fixtures);

    let resp = test::call_service(&app, RequestBuilder::sign_in("amy", true).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["authType"], "webauthn");
    assert_eq!(body["rpId"], "links.example");
    assert_eq!(body["userVerification"], "preferred");
    assert_eq!(body["allowCredentials"].as_array().map(Vec::len), Some(1));

    // The challenge the browser received is the one persisted on the user
    let stored = fixtures
        .store
        .find_user_by_login("amy")
        .await
        .unwrap()
        .expect("user exists");
    assert_eq!(stored.challenge.as_deref(), body["challenge"].as_str());
    assert!(stored.has_pending_challenge());
}

#[actix_web::test]
async fn test_otp_path_records_single_use_six_digit_code() {
    let fixtures = TestFixtures::new();
    fixtures.seed_user("amy@example.com", "amy").await;
    let app = app!(fixtures);

    let resp = test::call_service(&app, RequestBuilder::sign_in("amy", false).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Peek at the recorded code through the store seam
    let otp = fixtures
        .store
        .peek_otp("amy@example.com")
        .expect("otp recorded");
    assert_eq!(otp.code.len(), 6);
    assert!(otp.code.chars().all(|c| c.is_ascii_digit()));
    assert!(!otp.is_expired());

    // Consuming it once removes it
    let taken = fixtures
        .store
        .take_otp("amy@example.com", &otp.code)
        .await
        .unwrap();
    assert!(taken.is_some());
    let again = fixtures
        .store
        .take_otp("amy@example.com", &otp.code)
        .await
        .unwrap();
    assert!(again.is_none());
}
