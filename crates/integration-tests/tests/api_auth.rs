//! Integration tests for signup and login.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (hamkra-cli migrate)
//! - The server running (cargo run -p hamkra-server)

use hamkra_integration_tests::{base_url, client, unique_email};
use reqwest::StatusCode;
use serde_json::json;

async fn post_credentials(path: &str, email: &str, password: &str) -> (StatusCode, String) {
    let resp = client()
        .post(format!("{}{path}", base_url()))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Failed to send request");

    let status = resp.status();
    (status, resp.text().await.expect("Failed to read response"))
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signup_then_login() {
    let email = unique_email();

    assert_eq!(
        post_credentials("/api/signup", &email, "p1").await,
        (StatusCode::OK, "Signup successful".to_string())
    );
    assert_eq!(
        post_credentials("/api/signup", &email, "p2").await,
        (StatusCode::BAD_REQUEST, "User already exists".to_string())
    );
    assert_eq!(
        post_credentials("/api/login", &email, "p1").await,
        (StatusCode::OK, "Login successful".to_string())
    );
    assert_eq!(
        post_credentials("/api/login", &email, "p2").await,
        (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_signup_keeps_first_password() {
    let email = unique_email();
    assert_eq!(post_credentials("/api/signup", &email, "first").await.0, StatusCode::OK);

    // Same password too: the unique index rejects the row, not a pre-check.
    assert_eq!(
        post_credentials("/api/signup", &email, "first").await,
        (StatusCode::BAD_REQUEST, "User already exists".to_string())
    );
    assert_eq!(
        post_credentials("/api/signup", &email, "second").await,
        (StatusCode::BAD_REQUEST, "User already exists".to_string())
    );

    assert_eq!(post_credentials("/api/login", &email, "first").await.0, StatusCode::OK);
    assert_eq!(
        post_credentials("/api/login", &email, "second").await.0,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_concurrent_signups_create_one_account() {
    let email = unique_email();

    let attempts = (0..8).map(|i| {
        let email = email.clone();
        tokio::spawn(async move { post_credentials("/api/signup", &email, &format!("p{i}")).await })
    });

    let mut successes = 0;
    for attempt in attempts {
        let (status, _) = attempt.await.expect("signup task panicked");
        match status {
            StatusCode::OK => successes += 1,
            StatusCode::BAD_REQUEST => {}
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(successes, 1);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signup_without_password_rejected() {
    let resp = client()
        .post(format!("{}/api/signup", base_url()))
        .json(&json!({"email": unique_email()}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
