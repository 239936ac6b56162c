use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use swapshop_engine::{db_types::User, helpers::hash_password, traits::AuthApiError, AuthApi};

use super::{helpers::post_request, mocks::MockAuthManager};
use crate::routes::{LoginRoute, RegisterRoute};

const WRONG_CREDENTIALS_JSON: &str = r#"{"error":"Authentication Error. The email address or password is incorrect"}"#;

fn user_row(nombre: &str, email: &str, hash: &str) -> User {
    User {
        id: "7b1e4a".to_string(),
        nombre: nombre.to_string(),
        email: email.to_string(),
        password_hash: hash.to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn configure_register(cfg: &mut ServiceConfig) {
    let mut auth = MockAuthManager::new();
    auth.expect_insert_user().returning(|user, hash| Ok(user_row(&user.nombre, &user.email, hash)));
    auth.expect_insert_auth_token().returning(|_| Ok(()));
    let api = AuthApi::new(auth, Duration::hours(24));
    cfg.service(RegisterRoute::<MockAuthManager>::new()).app_data(web::Data::new(api));
}

#[actix_web::test]
async fn register_issues_a_token() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "nombre": "Rosa", "email": "rosa@example.com", "password": "hunter2" });
    let (status, body) = post_request("/auth/register", &body, configure_register).await;
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert!(!response["token"].as_str().unwrap().is_empty());
    assert_eq!(response["user"]["nombre"], "Rosa");
    assert_eq!(response["user"]["email"], "rosa@example.com");
    // The stored hash must never appear in a response body.
    assert!(response["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn register_with_a_taken_email() {
    let _ = env_logger::try_init().ok();
    let configure = |cfg: &mut ServiceConfig| {
        let mut auth = MockAuthManager::new();
        auth.expect_insert_user().returning(|_, _| Err(AuthApiError::EmailAlreadyRegistered));
        let api = AuthApi::new(auth, Duration::hours(24));
        cfg.service(RegisterRoute::<MockAuthManager>::new()).app_data(web::Data::new(api));
    };
    let body = json!({ "nombre": "Rosa", "email": "rosa@example.com", "password": "hunter2" });
    let (status, body) = post_request("/auth/register", &body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"A user with this email address already exists"}"#);
}

async fn login_request(password: &str) -> (StatusCode, String) {
    let _ = env_logger::try_init().ok();
    let body = json!({ "email": "rosa@example.com", "password": password });
    let configure = |cfg: &mut ServiceConfig| {
        let mut auth = MockAuthManager::new();
        auth.expect_purge_expired_tokens().returning(|| Ok(0));
        auth.expect_fetch_user_by_email()
            .returning(|_| Ok(Some(user_row("Rosa", "rosa@example.com", &hash_password("hunter2")))));
        auth.expect_insert_auth_token().returning(|_| Ok(()));
        let api = AuthApi::new(auth, Duration::hours(24));
        cfg.service(LoginRoute::<MockAuthManager>::new()).app_data(web::Data::new(api));
    };
    post_request("/auth/login", &body, configure).await
}

#[actix_web::test]
async fn login_with_valid_credentials() {
    let (status, body) = login_request("hunter2").await;
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert!(!response["token"].as_str().unwrap().is_empty());
    assert_eq!(response["user"]["nombre"], "Rosa");
}

#[actix_web::test]
async fn login_survives_a_failed_token_purge() {
    let _ = env_logger::try_init().ok();
    // The pre-login purge is best-effort; a store error there must not block the login itself.
    let configure = |cfg: &mut ServiceConfig| {
        let mut auth = MockAuthManager::new();
        auth.expect_purge_expired_tokens()
            .returning(|| Err(AuthApiError::DatabaseError("lost the connection".to_string())));
        auth.expect_fetch_user_by_email()
            .returning(|_| Ok(Some(user_row("Rosa", "rosa@example.com", &hash_password("hunter2")))));
        auth.expect_insert_auth_token().returning(|_| Ok(()));
        let api = AuthApi::new(auth, Duration::hours(24));
        cfg.service(LoginRoute::<MockAuthManager>::new()).app_data(web::Data::new(api));
    };
    let body = json!({ "email": "rosa@example.com", "password": "hunter2" });
    let (status, body) = post_request("/auth/login", &body, configure).await;
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert!(!response["token"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn login_with_the_wrong_password() {
    let (status, body) = login_request("letmein").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, WRONG_CREDENTIALS_JSON);
}

#[actix_web::test]
async fn login_with_an_unknown_email() {
    let _ = env_logger::try_init().ok();
    let configure = |cfg: &mut ServiceConfig| {
        let mut auth = MockAuthManager::new();
        auth.expect_purge_expired_tokens().returning(|| Ok(0));
        auth.expect_fetch_user_by_email().returning(|_| Ok(None));
        let api = AuthApi::new(auth, Duration::hours(24));
        cfg.service(LoginRoute::<MockAuthManager>::new()).app_data(web::Data::new(api));
    };
    let body = json!({ "email": "nadie@example.com", "password": "hunter2" });
    let (status, body) = post_request("/auth/login", &body, configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // The body is identical to the wrong password case, so the two cannot be told apart.
    assert_eq!(body, WRONG_CREDENTIALS_JSON);
}
