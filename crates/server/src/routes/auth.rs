//! Signup and login handlers.
//!
//! Both take a JSON body `{ "email": ..., "password": ... }` and answer with a
//! plain-text acknowledgment. Login issues no session or token.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Credentials submitted to signup and login.
///
/// Absent fields deserialize as empty strings and fail the presence check.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Create an account.
///
/// `400 User already exists` when the email is taken.
pub async fn signup(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<&'static str> {
    let Json(body) = payload?;

    let account = state.auth().signup(&body.email, &body.password).await?;
    let account_id = account.id.to_string();
    add_breadcrumb("auth", "Signup", Some(&[("account_id", account_id.as_str())]));

    Ok("Signup successful")
}

/// Check credentials.
///
/// `401 Invalid credentials` unless email and password both match exactly.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<&'static str> {
    let Json(body) = payload?;

    let account = state.auth().login(&body.email, &body.password).await?;
    let account_id = account.id.to_string();
    add_breadcrumb("auth", "Login", Some(&[("account_id", account_id.as_str())]));

    Ok("Login successful")
}
