//! Integration tests for the client/admin request workflow.
//!
//! Requires a running portal and `PORTAL_DATABASE_URL` pointing at the same
//! database, used to promote the admin account.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use arpk_integration_tests::{client, get, location, pool, post_form, promote, register, unique_email};
use reqwest::{Client, StatusCode};

/// Register a client and an admin, each with their own session.
async fn client_and_admin() -> (Client, String, Client) {
    let client_email = unique_email("client");
    let client_http = client();
    register(&client_http, &client_email).await;

    let admin_email = unique_email("admin");
    let admin_http = client();
    register(&admin_http, &admin_email).await;
    promote(&pool().await, &admin_email).await;

    (client_http, client_email, admin_http)
}

async fn latest_request_id(table: &str, client_email: &str) -> i32 {
    sqlx::query_scalar(&format!(
        "SELECT id FROM portal.{table} WHERE client_email = $1 ORDER BY id DESC LIMIT 1"
    ))
    .bind(client_email)
    .fetch_one(&pool().await)
    .await
    .unwrap()
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_roles_are_kept_to_their_own_pages() {
    let (client_http, _, admin_http) = client_and_admin().await;

    let resp = get(&client_http, "/admin/discounts").await;
    assert_eq!(location(&resp), "/dashboard/client");

    let resp = get(&client_http, "/dashboard").await;
    assert_eq!(location(&resp), "/dashboard/client");

    // Promotion applies on the next request without signing in again.
    let resp = get(&admin_http, "/dashboard").await;
    assert_eq!(location(&resp), "/dashboard/admin");

    let resp = get(&admin_http, "/billing").await;
    assert_eq!(location(&resp), "/dashboard/admin");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_website_request_approval() {
    let (client_http, client_email, admin_http) = client_and_admin().await;

    let resp = post_form(
        &client_http,
        "/dashboard/client/requests",
        &[
            ("title", "Bakery site"),
            ("description", "A site for our bakery"),
            ("requirements", "Menu page, online orders"),
        ],
    )
    .await;
    assert_eq!(location(&resp), "/dashboard/client?success=request_submitted");

    let id = latest_request_id("website_request", &client_email).await;
    let path = format!("/dashboard/admin/requests/{id}/status");

    // Clients may not decide.
    let resp = post_form(&client_http, &path, &[("status", "approved")]).await;
    assert_eq!(location(&resp), "/dashboard/client");

    let resp = post_form(&admin_http, &path, &[("status", "approved")]).await;
    assert_eq!(
        location(&resp),
        "/dashboard/admin?success=status&to=approved"
    );

    let resp = post_form(&admin_http, &path, &[("status", "approved")]).await;
    assert_eq!(location(&resp), "/dashboard/admin?error=status_unchanged");

    let resp = post_form(&admin_http, &path, &[("status", "pending")]).await;
    assert_eq!(location(&resp), "/dashboard/admin?error=invalid_status");

    let body = get(&client_http, "/dashboard/client").await.text().await.unwrap();
    assert!(body.contains("Bakery site"));
    assert!(body.contains("Approved"));
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_empty_website_request_is_rejected() {
    let (client_http, _, _) = client_and_admin().await;

    let resp = post_form(
        &client_http,
        "/dashboard/client/requests",
        &[("title", "  "), ("description", "x"), ("requirements", "y")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.text().await.unwrap().contains("Project title"));
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_payment_request_paid() {
    let (client_http, client_email, admin_http) = client_and_admin().await;

    let resp = post_form(
        &client_http,
        "/billing",
        &[
            ("title", "Deposit"),
            ("description", "Initial deposit"),
            ("amount", "1500.50"),
        ],
    )
    .await;
    assert_eq!(location(&resp), "/billing?success=payment_requested");

    let id = latest_request_id("payment_request", &client_email).await;
    let resp = post_form(
        &admin_http,
        &format!("/admin/payments/{id}/status"),
        &[("status", "paid")],
    )
    .await;
    assert_eq!(location(&resp), "/admin/payments?success=status&to=paid");

    let body = get(&client_http, "/billing").await.text().await.unwrap();
    assert!(body.contains("$1,500.50"));
    assert!(body.contains("Paid"));
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_project_assignment_is_visible_to_client() {
    let (client_http, client_email, admin_http) = client_and_admin().await;

    let resp = post_form(
        &admin_http,
        "/admin/projects",
        &[
            ("title", "Bakery rebuild"),
            ("description", "Full rebuild"),
            ("assigned_to", client_email.as_str()),
            ("budget", "5000"),
            ("status", "active"),
        ],
    )
    .await;
    assert_eq!(location(&resp), "/admin/projects?success=project_created");

    let body = get(&client_http, "/projects").await.text().await.unwrap();
    assert!(body.contains("Bakery rebuild"));
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_discount_codes() {
    let (_, _, admin_http) = client_and_admin().await;
    let code = format!("IT{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);

    let form = [
        ("code", code.as_str()),
        ("description", "Integration discount"),
        ("kind", "percentage"),
        ("value", "15"),
        ("is_public", "on"),
    ];

    let resp = post_form(&admin_http, "/admin/discounts", &form).await;
    assert_eq!(location(&resp), "/admin/discounts?success=discount_created");

    let resp = post_form(&admin_http, "/admin/discounts", &form).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let id: i32 = sqlx::query_scalar("SELECT id FROM portal.discount WHERE code = $1")
        .bind(code.to_uppercase())
        .fetch_one(&pool().await)
        .await
        .unwrap();

    let resp = post_form(&admin_http, &format!("/admin/discounts/{id}/toggle"), &[]).await;
    assert_eq!(
        location(&resp),
        "/admin/discounts?success=discount_deactivated"
    );
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_clients_only_see_their_own_rows() {
    let (owner_http, owner_email, admin_http) = client_and_admin().await;
    let other_http = client();
    register(&other_http, &unique_email("other")).await;

    let tag = uuid::Uuid::new_v4().simple().to_string();
    let website_title = format!("Owner site {tag}");
    let payment_title = format!("Owner invoice {tag}");
    let project_title = format!("Owner project {tag}");

    let resp = post_form(
        &owner_http,
        "/dashboard/client/requests",
        &[
            ("title", website_title.as_str()),
            ("description", "Private request"),
            ("requirements", "Nothing shared"),
        ],
    )
    .await;
    assert_eq!(location(&resp), "/dashboard/client?success=request_submitted");

    let resp = post_form(
        &owner_http,
        "/billing",
        &[
            ("title", payment_title.as_str()),
            ("description", "Private payment"),
            ("amount", "250"),
        ],
    )
    .await;
    assert_eq!(location(&resp), "/billing?success=payment_requested");

    let resp = post_form(
        &admin_http,
        "/admin/projects",
        &[
            ("title", project_title.as_str()),
            ("description", "Private project"),
            ("assigned_to", owner_email.as_str()),
            ("budget", "1000"),
            ("status", "active"),
        ],
    )
    .await;
    assert_eq!(location(&resp), "/admin/projects?success=project_created");

    let pages = [
        ("/dashboard/client", &website_title),
        ("/billing", &payment_title),
        ("/projects", &project_title),
    ];

    for (path, title) in pages {
        let owner_body = get(&owner_http, path).await.text().await.unwrap();
        assert!(owner_body.contains(title.as_str()), "{path} should list own row");

        let other_body = get(&other_http, path).await.text().await.unwrap();
        for (_, foreign) in pages {
            assert!(
                !other_body.contains(foreign.as_str()),
                "{path} leaked {foreign}"
            );
        }
    }
}
