use serde_json::{Value, json};

use crate::helpers::{TEST_PASSWORD, error_detail, spawn_app};

#[tokio::test]
async fn register_returns_created_user_without_credential() {
    let app = spawn_app().await;

    let response = app.register("alice").await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["is_active"], true);
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn register_duplicate_username_fails_regardless_of_email() {
    let app = spawn_app().await;
    assert_eq!(app.register("alice").await.status(), 201);

    let response = app
        .client
        .post(format!("{}/admin/register/", app.address))
        .json(&json!({
            "username": "alice",
            "full_name": "Other Alice",
            "email": "unrelated@example.com",
            "password": TEST_PASSWORD,
            "password_confirm": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert!(error_detail(response).await.contains("username"));
}

#[tokio::test]
async fn register_duplicate_email_fails() {
    let app = spawn_app().await;
    assert_eq!(app.register("alice").await.status(), 201);

    let response = app
        .client
        .post(format!("{}/admin/register/", app.address))
        .json(&json!({
            "username": "alice2",
            "full_name": "Other Alice",
            "email": "alice@example.com",
            "password": TEST_PASSWORD,
            "password_confirm": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert!(error_detail(response).await.contains("email"));
}

#[tokio::test]
async fn register_mismatched_passwords_fail() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(format!("{}/admin/register/", app.address))
        .json(&json!({
            "username": "alice",
            "full_name": "Alice",
            "email": "alice@example.com",
            "password": TEST_PASSWORD,
            "password_confirm": "something-else",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(error_detail(response).await, "Passwords do not match.");
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(format!("{}/admin/register/", app.address))
        .json(&json!({
            "username": "alice",
            "full_name": "Alice",
            "email": "not-an-email",
            "password": TEST_PASSWORD,
            "password_confirm": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn login_returns_bearer_token_pair() {
    let app = spawn_app().await;
    assert_eq!(app.register("alice").await.status(), 201);

    let response = app.login("alice", TEST_PASSWORD).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["token_type"], "bearer");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let app = spawn_app().await;
    assert_eq!(app.register("alice").await.status(), 201);

    let wrong_password = app.login("alice", "wrong-password").await;
    assert_eq!(wrong_password.status(), 401);

    let unknown_user = app.login("nobody", TEST_PASSWORD).await;
    assert_eq!(unknown_user.status(), 401);
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/blog/show_my_posts/", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = spawn_app().await;

    let response = app.show_my_posts("not.a.token", "").await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn token_kinds_are_not_interchangeable() {
    let app = spawn_app().await;
    assert_eq!(app.register("alice").await.status(), 201);
    let (access, refresh) = app.login_tokens("alice").await;

    // An access token must not drive the refresh endpoint.
    let refreshed_with_access = app
        .client
        .post(format!("{}/admin/refresh/", app.address))
        .bearer_auth(&access)
        .send()
        .await
        .unwrap();
    assert_eq!(refreshed_with_access.status(), 401);

    // A refresh token must not open protected routes.
    let listed_with_refresh = app.show_my_posts(&refresh, "").await;
    assert_eq!(listed_with_refresh.status(), 401);
}

#[tokio::test]
async fn refresh_mints_a_working_access_token() {
    let app = spawn_app().await;
    assert_eq!(app.register("alice").await.status(), 201);
    let (_access, refresh) = app.login_tokens("alice").await;

    let response = app
        .client
        .post(format!("{}/admin/refresh/", app.address))
        .bearer_auth(&refresh)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let new_access = body["access_token"].as_str().unwrap();
    assert_eq!(body["token_type"], "bearer");

    // The minted token opens a protected route.
    let update = app
        .client
        .put(format!("{}/admin/update/", app.address))
        .bearer_auth(new_access)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status(), 200);
}

#[tokio::test]
async fn update_profile_applies_only_supplied_fields() {
    let app = spawn_app().await;
    let token = app.register_and_login("alice").await;

    let response = app
        .client
        .put(format!("{}/admin/update/", app.address))
        .bearer_auth(&token)
        .json(&json!({
            "full_name": "Alice Updated",
            "email": "alice-updated@example.com",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["full_name"], "Alice Updated");
    assert_eq!(body["email"], "alice-updated@example.com");
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn change_password_rotates_the_credential() {
    let app = spawn_app().await;
    let token = app.register_and_login("alice").await;

    // Wrong old password is rejected.
    let wrong = app
        .client
        .put(format!("{}/admin/change_password/", app.address))
        .bearer_auth(&token)
        .json(&json!({
            "old_password": "not-the-password",
            "new_password": "brand-new-password",
            "new_password_confirm": "brand-new-password",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), 400);

    // Correct rotation succeeds.
    let response = app
        .client
        .put(format!("{}/admin/change_password/", app.address))
        .bearer_auth(&token)
        .json(&json!({
            "old_password": TEST_PASSWORD,
            "new_password": "brand-new-password",
            "new_password_confirm": "brand-new-password",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password changed successfully.");

    // Old credential is dead, new one works.
    assert_eq!(app.login("alice", TEST_PASSWORD).await.status(), 401);
    assert_eq!(app.login("alice", "brand-new-password").await.status(), 200);
}

#[tokio::test]
async fn deactivated_user_is_locked_out() {
    let app = spawn_app().await;
    let token = app.register_and_login("alice").await;

    let response = app
        .client
        .put(format!("{}/admin/update/", app.address))
        .bearer_auth(&token)
        .json(&json!({ "is_active": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // The still-valid token no longer opens anything.
    assert_eq!(app.show_my_posts(&token, "").await.status(), 403);
    // Neither does a fresh login.
    assert_eq!(app.login("alice", TEST_PASSWORD).await.status(), 403);
}

#[tokio::test]
async fn delete_account_is_blocked_while_posts_exist() {
    let app = spawn_app().await;
    let token = app.register_and_login("alice").await;

    let created = app.create_post(&token, "My only post", "content").await;
    assert_eq!(created.status(), 201);
    let post: Value = created.json().await.unwrap();
    let post_id = post["id"].as_i64().unwrap();

    let blocked = app
        .client
        .delete(format!("{}/admin/delete/", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(blocked.status(), 400);
    assert_eq!(
        error_detail(blocked).await,
        "At least one post belongs to this user."
    );

    // After the post is gone the same deletion succeeds.
    let deleted_post = app
        .client
        .delete(format!("{}/blog/delete_post/{post_id}/", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted_post.status(), 200);

    let deleted = app
        .client
        .delete(format!("{}/admin/delete/", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 200);
    let body: Value = deleted.json().await.unwrap();
    assert_eq!(body["message"], "User deleted successfully.");

    assert_eq!(app.login("alice", TEST_PASSWORD).await.status(), 401);
}
