//! Integration tests for the health endpoints.

use hamkra_integration_tests::{base_url, client};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_liveness_and_readiness() {
    let client = client();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to reach /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}
