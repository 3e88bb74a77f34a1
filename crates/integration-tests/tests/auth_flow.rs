//! Integration tests for registration, sign-in and sign-out.
//!
//! Requires a running portal (`cargo run -p arpk-portal`).

#![allow(clippy::unwrap_used)]

use arpk_integration_tests::{
    TEST_PASSWORD, client, get, location, login, post_form, register, unique_email,
};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_register_signs_in_as_client() {
    let client = client();
    let email = unique_email("register");

    let resp = register(&client, &email).await;
    assert_eq!(location(&resp), "/dashboard/client");

    let resp = get(&client, "/dashboard/client").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains(&email));

    // Signed-in visitors skip the auth pages.
    let resp = get(&client, "/login").await;
    assert_eq!(location(&resp), "/dashboard/client");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_register_rejects_duplicate_email() {
    let email = unique_email("dupe");
    register(&client(), &email).await;

    let resp = register(&client(), &email).await;
    assert_eq!(location(&resp), "/register?error=email_taken");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_register_validation() {
    let client = client();
    let email = unique_email("weak");

    let resp = post_form(
        &client,
        "/register",
        &[
            ("email", email.as_str()),
            ("password", "short"),
            ("password_confirm", "short"),
        ],
    )
    .await;
    assert_eq!(location(&resp), "/register?error=weak_password");

    let resp = post_form(
        &client,
        "/register",
        &[
            ("email", email.as_str()),
            ("password", TEST_PASSWORD),
            ("password_confirm", "something-else-entirely"),
        ],
    )
    .await;
    assert_eq!(location(&resp), "/register?error=password_mismatch");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_login_and_logout() {
    let email = unique_email("login");
    register(&client(), &email).await;

    let client = client();
    let resp = login(&client, &email, "wrong-password-123").await;
    assert_eq!(location(&resp), "/login?error=credentials");

    let resp = login(&client, &email, TEST_PASSWORD).await;
    assert_eq!(location(&resp), "/dashboard/client");

    let resp = post_form(&client, "/logout", &[]).await;
    assert_eq!(location(&resp), "/");

    let resp = get(&client, "/dashboard/client").await;
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_unknown_email_is_generic_failure() {
    let resp = login(&client(), &unique_email("ghost"), TEST_PASSWORD).await;
    assert_eq!(location(&resp), "/login?error=credentials");
}
