//! User administration routes

mod common;

use common::{alice, register_alice, send, test_app};
use serde_json::json;

fn bob() -> serde_json::Value {
    json!({
        "name": "Bob",
        "lastName": "Builder",
        "username": "bob",
        "email": "b@gmail.com",
        "password": "hunter22"
    })
}

#[tokio::test]
async fn test_create_user() {
    let (app, _) = test_app(false);
    let (token, _) = register_alice(&app).await;

    let (status, body) = send(&app, "POST", "/api/users", Some(&token), Some(bob())).await;
    assert_eq!(status, 201);
    assert_eq!(body["user"]["id"], 2);
    assert_eq!(body["user"]["username"], "bob");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password").is_none());

    // The created user can log in with the supplied password
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "bob", "password": "hunter22"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["userId"], 2);
}

#[tokio::test]
async fn test_create_user_conflict_and_blank_fields() {
    let (app, _) = test_app(false);
    let (token, _) = register_alice(&app).await;

    let (status, body) = send(&app, "POST", "/api/users", Some(&token), Some(alice())).await;
    assert_eq!(status, 409);
    assert_eq!(body, json!({"message": "Key (username)=(alice) already exists."}));

    let mut same_phone = bob();
    same_phone["phone"] = json!("555-0100");
    let (status, body) = send(&app, "POST", "/api/users", Some(&token), Some(same_phone)).await;
    assert_eq!(status, 409);
    assert_eq!(body, json!({"message": "Key (phone)=(555-0100) already exists."}));

    let mut blank = bob();
    blank["email"] = json!(" ");
    let (status, body) = send(&app, "POST", "/api/users", Some(&token), Some(blank)).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"message": "Email cannot be blank"}));

    let (status, users) = send(&app, "GET", "/api/users", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_update_user() {
    let (app, _) = test_app(false);
    let (token, id) = register_alice(&app).await;
    let path = format!("/api/users/{}", id);

    let mut update = alice();
    update["name"] = json!("Alicia");
    update["password"] = json!("new-secret");
    let (status, body) = send(&app, "PUT", &path, Some(&token), Some(update)).await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Alicia");
    assert_eq!(body["username"], "alice");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "alice", "password": "pw123456"})),
    )
    .await;
    assert_eq!(status, 401);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "alice", "password": "new-secret"})),
    )
    .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_update_user_not_found_and_conflict() {
    let (app, _) = test_app(false);
    let (token, id) = register_alice(&app).await;
    send(&app, "POST", "/api/users", Some(&token), Some(bob())).await;

    let (status, body) = send(&app, "PUT", "/api/users/99", Some(&token), Some(bob())).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"message": "User not found"}));

    let (status, body) = send(&app, "PUT", "/api/users/+1", Some(&token), Some(alice())).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"message": "User not found"}));

    let mut steal = alice();
    steal["email"] = json!("b@gmail.com");
    let (status, body) = send(&app, "PUT", &format!("/api/users/{}", id), Some(&token), Some(steal)).await;
    assert_eq!(status, 409);
    assert_eq!(body, json!({"message": "Key (email)=(b@gmail.com) already exists."}));

    let (status, body) = send(&app, "GET", &format!("/api/users/{}", id), None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body["email"], "a@gmail.com");
}
