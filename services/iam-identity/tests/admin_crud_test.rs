//! 用户、角色、角色分配的管理接口测试

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{Value, json};

async fn create(app: &TestApp, token: &str, uri: &str, body: Value) -> Value {
    let (status, created) = app.call("POST", uri, Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);
    created
}

#[tokio::test]
async fn test_user_crud_never_exposes_password() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let user = create(
        &app,
        &admin,
        "/api/users",
        json!({
            "username": "jdoe",
            "email": "JDoe@Example.com",
            "password": "Str0ng!Pass",
            "first_name": " John ",
            "last_name": "Doe"
        }),
    )
    .await;
    assert_eq!(user["email"], "jdoe@example.com");
    assert_eq!(user["first_name"], "John");
    assert_eq!(user["display_name"], "John Doe");
    assert_eq!(user["status"], "Active");
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let id = user["id"].as_str().unwrap();
    let (status, updated) = app
        .call(
            "PUT",
            &format!("/api/users/{}", id),
            Some(&admin),
            Some(json!({
                "username": "jdoe",
                "email": "john.doe@example.com",
                "phone": "+49 30 1234",
                "status": "Active"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], "john.doe@example.com");
    assert!(updated["first_name"].is_null());

    // 更新不会改变密码
    let (status, _) = app.login("jdoe", "Str0ng!Pass").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_validation_and_uniqueness() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, _) = app
        .call(
            "POST",
            "/api/users",
            Some(&admin),
            Some(json!({ "username": "weak", "email": "weak@example.com", "password": "password" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            "POST",
            "/api/users",
            Some(&admin),
            Some(json!({ "username": "bad name", "email": "x@example.com", "password": "Str0ng!Pass" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            "POST",
            "/api/users",
            Some(&admin),
            Some(json!({ "username": "other", "email": "admin@forge.local", "password": "Str0ng!Pass" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .call(
            "POST",
            "/api/users",
            Some(&admin),
            Some(json!({ "username": "admin", "email": "new@forge.local", "password": "Str0ng!Pass" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_role_assignment_drives_token_permissions() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let user = create(
        &app,
        &admin,
        "/api/users",
        json!({ "username": "buyer1", "email": "buyer1@example.com", "password": "Str0ng!Pass" }),
    )
    .await;
    let role = create(
        &app,
        &admin,
        "/api/roles",
        json!({ "name": "Buyer", "permissions": ["suppliers.read", "purchase-orders.*", "suppliers.read"] }),
    )
    .await;
    assert_eq!(role["permissions"], json!(["purchase-orders.*", "suppliers.read"]));

    let (_, before) = app.login("buyer1", "Str0ng!Pass").await;
    assert_eq!(before["permissions"], json!([]));

    create(
        &app,
        &admin,
        "/api/user-roles",
        json!({ "user_id": user["id"], "role_id": role["id"] }),
    )
    .await;

    let (status, _) = app
        .call(
            "POST",
            "/api/user-roles",
            Some(&admin),
            Some(json!({ "user_id": user["id"], "role_id": role["id"] })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, after) = app.login("buyer1", "Str0ng!Pass").await;
    assert_eq!(after["roles"], json!(["Buyer"]));
    assert_eq!(after["permissions"], json!(["purchase-orders.*", "suppliers.read"]));

    // 没有 users.read 权限
    let buyer = after["access_token"].as_str().unwrap();
    let (status, _) = app.call("GET", "/api/users", Some(buyer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 停用角色后权限随之失效
    let (status, _) = app
        .call(
            "PUT",
            &format!("/api/roles/{}", role["id"].as_str().unwrap()),
            Some(&admin),
            Some(json!({ "name": "Buyer", "permissions": ["suppliers.read"], "status": "Inactive" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, me) = app.call("GET", "/api/auth/me", Some(buyer), None).await;
    assert_eq!(me["permissions"], json!([]));
}

#[tokio::test]
async fn test_assignment_requires_existing_active_user_and_role() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, _) = app
        .call(
            "POST",
            "/api/user-roles",
            Some(&admin),
            Some(json!({
                "user_id": "0190f5a0-0000-7000-8000-000000000001",
                "role_id": "0190f5a0-0000-7000-8000-000000000002"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blocked_user_cannot_log_in() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let user = create(
        &app,
        &admin,
        "/api/users",
        json!({ "username": "temp", "email": "temp@example.com", "password": "Str0ng!Pass" }),
    )
    .await;
    let (status, _) = app
        .call(
            "PUT",
            &format!("/api/users/{}", user["id"].as_str().unwrap()),
            Some(&admin),
            Some(json!({ "username": "temp", "email": "temp@example.com", "status": "Blocked" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.login("temp", "Str0ng!Pass").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    // 密码错误时仍返回 401，不泄露账号状态
    let (status, _) = app.login("temp", "Wr0ng!Pass").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_soft_deleted_user_cannot_log_in_until_restored() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let user = create(
        &app,
        &admin,
        "/api/users",
        json!({ "username": "leaver", "email": "leaver@example.com", "password": "Str0ng!Pass" }),
    )
    .await;
    let id = user["id"].as_str().unwrap();

    let (status, _) = app
        .call("DELETE", &format!("/api/users/{}", id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.login("leaver", "Str0ng!Pass").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, deleted) = app.call("GET", "/api/users/deleted", Some(&admin), None).await;
    assert_eq!(deleted["total"], 1);

    let (status, _) = app
        .call("POST", &format!("/api/users/{}/restore", id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.login("leaver", "Str0ng!Pass").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_system_role_is_protected() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (_, found) = app
        .call("GET", "/api/roles/search?q=admin", Some(&admin), None)
        .await;
    assert_eq!(found["total"], 1);
    let id = found["items"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(found["items"][0]["is_system"], true);

    let (status, _) = app
        .call("DELETE", &format!("/api/roles/{}", id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    let (status, _) = app
        .call("DELETE", &format!("/api/roles/{}/permanent", id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);

    let (status, _) = app
        .call(
            "PUT",
            &format!("/api/roles/{}", id),
            Some(&admin),
            Some(json!({ "name": "Root", "permissions": ["*"] })),
        )
        .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
}
