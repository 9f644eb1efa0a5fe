//! In-process tests for the shopping list routes.
//!
//! Each test builds a fresh router over an in-memory store; no server or
//! database is needed.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use shopping_list_api::middleware::REQUEST_ID_HEADER;
use shopping_list_api::models::{Member, ShoppingList};
use shopping_list_core::ListId;
use shopping_list_integration_tests::{CALLER_ID, TestApp, list_uri};

/// Seed a list owned by someone other than the caller.
async fn seed_foreign_list(app: &TestApp, owner: &str, members: &[&str]) -> ListId {
    let list = ShoppingList {
        id: ListId::generate(),
        title: "Someone else's list".to_string(),
        description: String::new(),
        owner_id: owner.to_string(),
        members: members
            .iter()
            .map(|user_id| Member {
                user_id: (*user_id).to_string(),
            })
            .collect(),
        items: Vec::new(),
        is_archived: false,
        created_at: Utc::now(),
    };
    let id = list.id;
    app.store.seed(list).await;
    id
}

fn ids(list_mine: &Value) -> Vec<&str> {
    list_mine["itemList"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect()
}

// ============================================================================
// Authorization gate
// ============================================================================

#[tokio::test]
async fn test_missing_profile_header_is_unauthorized_everywhere() {
    let app = TestApp::new();

    for uri in [list_uri("/create"), list_uri("/listMine"), "/nope".to_string()] {
        let resp = app.send(Method::POST, &uri, None, Some(json!({}))).await;
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(resp.error_code(), "unauthorized");
        assert_eq!(resp.json["message"], "Missing x-user-profile header.");
    }
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_empty_profile_header_is_unauthorized() {
    let app = TestApp::new();
    let resp = app
        .send(Method::GET, &list_uri("/listMine"), Some(""), None)
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_profile_is_rejected() {
    let app = TestApp::new();
    let resp = app.post("/create", "admin", json!({"title": "x"})).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), "invalidProfile");
    assert_eq!(
        resp.json["message"],
        "x-user-profile must be one of: user, owner, member."
    );
}

#[tokio::test]
async fn test_role_filter_forbids_disallowed_profiles() {
    let app = TestApp::new();
    let list_id = app.create_list("Groceries").await;

    let resp = app.post("/create", "member", json!({"title": "x"})).await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(resp.error_code(), "forbidden");
    assert_eq!(
        resp.json["message"],
        "You are not allowed to call this endpoint."
    );

    let resp = app
        .post("/archive", "user", json!({"id": list_id, "archive": true}))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app
        .post("/item/add", "user", json!({"listId": list_id, "name": "Milk"}))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app
        .post("/member/add", "member", json!({"listId": list_id, "userId": "x"}))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let resp = app.get("/nope", "user").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json,
        json!({"errorCode": "notFound", "message": "Endpoint not found."})
    );

    let resp = app
        .send(Method::GET, "/somewhere/else", Some("owner"), None)
        .await;
    assert_eq!(resp.error_code(), "notFound");
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let app = TestApp::new();
    let resp = app.post("/get", "user", json!({"id": "x"})).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.error_code(), "notFound");
}

#[tokio::test]
async fn test_health_bypasses_gate() {
    let app = TestApp::new();

    let resp = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text, "ok");

    let resp = app.send(Method::GET, "/health/ready", None, None).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();

    let resp = app.get("/listMine", "user").await;
    assert!(resp.headers.contains_key(REQUEST_ID_HEADER));

    let resp = app.send(Method::GET, "/nope", None, None).await;
    assert!(resp.headers.contains_key(REQUEST_ID_HEADER));
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
async fn test_create_with_blank_title_is_invalid() {
    let app = TestApp::new();
    let resp = app.post("/create", "user", json!({"title": "   "})).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json,
        json!({
            "errorCode": "invalidDtoIn",
            "message": "title must be a non-empty string.",
            "param": "title",
        })
    );
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_rejects_non_object_body() {
    let app = TestApp::new();
    let resp = app.post("/create", "user", json!(["title"])).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json["param"], "dtoIn");
}

#[tokio::test]
async fn test_create_then_get_returns_same_list() {
    let app = TestApp::new();

    let created = app
        .post("/create", "user", json!({"title": "Groceries"}))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json["title"], "Groceries");
    assert_eq!(created.json["description"], "");
    assert_eq!(created.json["ownerId"], CALLER_ID);
    assert_eq!(created.json["members"], json!([]));
    assert_eq!(created.json["items"], json!([]));
    assert_eq!(created.json["isArchived"], false);
    assert!(created.json["createdAt"].as_str().unwrap().ends_with('Z'));

    let id = created.json["id"].as_str().unwrap();
    let fetched = app.get(&format!("/get?id={id}"), "member").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json, created.json);
}

#[tokio::test]
async fn test_get_reports_missing_and_unknown_ids() {
    let app = TestApp::new();

    let resp = app.get("/get", "user").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json["param"], "id");

    let resp = app.get("/get?id=not-an-id", "user").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.error_code(), "listNotFound");
    assert_eq!(resp.json["message"], "Shopping list not found.");

    let resp = app
        .get(&format!("/get?id={}", ListId::generate()), "user")
        .await;
    assert_eq!(resp.error_code(), "listNotFound");
}

/// `get` does not check ownership or membership.
#[tokio::test]
async fn test_get_ignores_membership() {
    let app = TestApp::new();
    let id = seed_foreign_list(&app, "stranger", &[]).await;

    let resp = app.get(&format!("/get?id={id}"), "member").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["ownerId"], "stranger");
}

#[tokio::test]
async fn test_list_mine_filters_archived() {
    let app = TestApp::new();
    let archived = app.create_list("Old").await;
    let active = app.create_list("New").await;

    let resp = app
        .post("/archive", "owner", json!({"id": archived, "archive": true}))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json, json!({"id": archived, "isArchived": true}));

    let resp = app.get("/listMine", "user").await;
    assert_eq!(ids(&resp.json), vec![active.as_str()]);

    let resp = app.get("/listMine?includeArchived=false", "user").await;
    assert_eq!(ids(&resp.json), vec![active.as_str()]);

    let resp = app.get("/listMine?includeArchived=true", "user").await;
    let mut all = ids(&resp.json);
    all.sort_unstable();
    let mut expected = vec![archived.as_str(), active.as_str()];
    expected.sort_unstable();
    assert_eq!(all, expected);

    let resp = app.get("/listMine?includeArchived=yes", "user").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json["param"], "includeArchived");
}

#[tokio::test]
async fn test_list_mine_newest_first_with_roles() {
    let app = TestApp::new();

    let older = ShoppingList {
        id: ListId::generate(),
        title: "Mine".to_string(),
        description: String::new(),
        owner_id: CALLER_ID.to_string(),
        members: Vec::new(),
        items: Vec::new(),
        is_archived: false,
        created_at: Utc::now() - Duration::hours(1),
    };
    let older_id = older.id;
    app.store.seed(older).await;
    let shared_id = seed_foreign_list(&app, "friend", &[CALLER_ID]).await;
    seed_foreign_list(&app, "stranger", &[]).await;

    let resp = app.get("/listMine", "member").await;
    let entries = resp.json["itemList"].as_array().unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["id"], json!(shared_id.to_string()));
    assert_eq!(entries[0]["role"], "member");
    assert_eq!(entries[1]["id"], json!(older_id.to_string()));
    assert_eq!(entries[1]["role"], "owner");
    assert_eq!(entries[1].as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn test_archive_requires_boolean() {
    let app = TestApp::new();
    let id = app.create_list("Groceries").await;

    let resp = app
        .post("/archive", "owner", json!({"id": id, "archive": "true"}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json["message"], "archive must be boolean.");

    let resp = app
        .post(
            "/archive",
            "owner",
            json!({"id": ListId::generate().to_string(), "archive": true}),
        )
        .await;
    assert_eq!(resp.error_code(), "listNotFound");
}

#[tokio::test]
async fn test_delete_removes_list() {
    let app = TestApp::new();
    let id = app.create_list("Groceries").await;

    let resp = app.delete("/delete", "owner", json!({"id": id})).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json, json!({"id": id, "deleted": true}));

    let resp = app.delete("/delete", "owner", json!({"id": id})).await;
    assert_eq!(resp.error_code(), "listNotFound");

    let resp = app.get(&format!("/get?id={id}"), "owner").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_requires_ownership() {
    let app = TestApp::new();
    let foreign = seed_foreign_list(&app, "someone-else", &[CALLER_ID]).await;

    let resp = app
        .post("/update", "owner", json!({"id": foreign.to_string(), "title": ""}))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(resp.error_code(), "forbidden");
    assert_eq!(resp.json["message"], "You are not the owner of this list.");
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let app = TestApp::new();
    let id = app.create_list("Groceries").await;

    let resp = app
        .post("/update", "owner", json!({"id": id, "description": "weekly"}))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["title"], "Groceries");
    assert_eq!(resp.json["description"], "weekly");

    let resp = app
        .post("/update", "owner", json!({"id": id, "title": "Party"}))
        .await;
    assert_eq!(resp.json["title"], "Party");
    assert_eq!(resp.json["description"], "weekly");

    let resp = app
        .post("/update", "owner", json!({"id": id, "title": "  "}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json["param"], "title");
}

// ============================================================================
// Members
// ============================================================================

#[tokio::test]
async fn test_member_add_is_idempotent() {
    let app = TestApp::new();
    let id = app.create_list("Groceries").await;
    let body = json!({"listId": id, "userId": "friend"});

    let first = app.post("/member/add", "owner", body.clone()).await;
    let second = app.post("/member/add", "owner", body.clone()).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.json, first.json);
    assert_eq!(
        second.json,
        json!({"listId": id, "members": [{"userId": "friend"}]})
    );

    let removed = app.post("/member/remove", "owner", body.clone()).await;
    assert_eq!(removed.json, json!({"listId": id, "members": []}));

    let again = app.post("/member/remove", "owner", body).await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.json["members"], json!([]));
}

#[tokio::test]
async fn test_member_add_validates_input() {
    let app = TestApp::new();

    let resp = app
        .post("/member/add", "owner", json!({"listId": "x", "userId": ""}))
        .await;
    assert_eq!(resp.json["param"], "userId");

    let resp = app
        .post("/member/add", "owner", json!({"listId": "x", "userId": "friend"}))
        .await;
    assert_eq!(resp.error_code(), "listNotFound");
}

// ============================================================================
// Items
// ============================================================================

#[tokio::test]
async fn test_item_add_defaults() {
    let app = TestApp::new();
    let id = app.create_list("Groceries").await;

    let resp = app
        .post("/item/add", "member", json!({"listId": id, "name": "Milk"}))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["listId"], json!(id));
    let item = &resp.json["item"];
    assert_eq!(item["name"], "Milk");
    assert_eq!(item["quantity"], 1);
    assert_eq!(item["isCompleted"], false);
    assert!(item["id"].is_string());
    assert!(item["createdAt"].is_string());

    let resp = app
        .post(
            "/item/add",
            "member",
            json!({"listId": id, "name": "Eggs", "quantity": "12"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json["message"], "quantity must be a number if provided.");

    let resp = app
        .post(
            "/item/add",
            "member",
            json!({"listId": ListId::generate().to_string(), "name": "Eggs"}),
        )
        .await;
    assert_eq!(resp.error_code(), "listNotFound");
}

#[tokio::test]
async fn test_item_update_partial_fields() {
    let app = TestApp::new();
    let list_id = app.create_list("Groceries").await;
    let added = app
        .post(
            "/item/add",
            "owner",
            json!({"listId": list_id, "name": "Milk", "quantity": 2}),
        )
        .await;
    let item_id = added.json["item"]["id"].as_str().unwrap().to_string();

    let resp = app
        .post(
            "/item/update",
            "member",
            json!({"listId": list_id, "itemId": item_id, "name": "Oat milk"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["item"]["name"], "Oat milk");
    assert_eq!(resp.json["item"]["quantity"], 2);

    let resp = app
        .post(
            "/item/update",
            "member",
            json!({"listId": list_id, "itemId": item_id, "quantity": 1.5}),
        )
        .await;
    assert_eq!(resp.json["item"]["name"], "Oat milk");
    assert_eq!(resp.json["item"]["quantity"], 1.5);

    let resp = app
        .post(
            "/item/update",
            "member",
            json!({"listId": list_id, "itemId": item_id, "name": ""}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json["message"],
        "name must be a non-empty string if provided."
    );

    let resp = app
        .post(
            "/item/update",
            "member",
            json!({"listId": list_id, "itemId": ListId::generate().to_string()}),
        )
        .await;
    assert_eq!(resp.error_code(), "itemNotFound");
    assert_eq!(resp.json["message"], "Item not found in this list.");
}

#[tokio::test]
async fn test_item_set_completed_and_remove() {
    let app = TestApp::new();
    let list_id = app.create_list("Groceries").await;
    let added = app
        .post("/item/add", "owner", json!({"listId": list_id, "name": "Milk"}))
        .await;
    let item_id = added.json["item"]["id"].as_str().unwrap().to_string();

    let resp = app
        .post(
            "/item/setCompleted",
            "member",
            json!({"listId": list_id, "itemId": item_id, "completed": "yes"}),
        )
        .await;
    assert_eq!(resp.json["param"], "completed");

    let resp = app
        .post(
            "/item/setCompleted",
            "member",
            json!({"listId": list_id, "itemId": item_id, "completed": true}),
        )
        .await;
    assert_eq!(
        resp.json,
        json!({"listId": list_id, "item": {"id": item_id, "isCompleted": true}})
    );

    let resp = app
        .post(
            "/item/remove",
            "member",
            json!({"listId": list_id, "itemId": item_id}),
        )
        .await;
    assert_eq!(
        resp.json,
        json!({"listId": list_id, "removedItemId": item_id})
    );

    let resp = app
        .post(
            "/item/remove",
            "member",
            json!({"listId": list_id, "itemId": item_id}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.error_code(), "itemNotFound");
}

// ============================================================================
// End to end
// ============================================================================

#[tokio::test]
async fn test_full_list_lifecycle() {
    let app = TestApp::new();

    let created = app
        .post(
            "/create",
            "user",
            json!({"title": "BBQ", "description": "Saturday"}),
        )
        .await;
    let list_id = created.json["id"].as_str().unwrap().to_string();

    app.post("/member/add", "owner", json!({"listId": list_id, "userId": "sam"}))
        .await;

    let bread = app
        .post("/item/add", "member", json!({"listId": list_id, "name": "Buns", "quantity": 8}))
        .await;
    let bread_id = bread.json["item"]["id"].as_str().unwrap().to_string();
    let meat = app
        .post("/item/add", "member", json!({"listId": list_id, "name": "Sausages"}))
        .await;
    let meat_id = meat.json["item"]["id"].as_str().unwrap().to_string();

    app.post(
        "/item/update",
        "member",
        json!({"listId": list_id, "itemId": meat_id, "quantity": 12}),
    )
    .await;
    app.post(
        "/item/setCompleted",
        "member",
        json!({"listId": list_id, "itemId": bread_id, "completed": true}),
    )
    .await;

    let list = app.get(&format!("/get?id={list_id}"), "owner").await;
    assert_eq!(list.json["description"], "Saturday");
    assert_eq!(list.json["members"], json!([{"userId": "sam"}]));
    let items = list.json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Buns");
    assert_eq!(items[0]["isCompleted"], true);
    assert_eq!(items[1]["name"], "Sausages");
    assert_eq!(items[1]["quantity"], 12);

    app.post(
        "/item/remove",
        "owner",
        json!({"listId": list_id, "itemId": bread_id}),
    )
    .await;
    app.post("/archive", "owner", json!({"id": list_id, "archive": true}))
        .await;

    let mine = app.get("/listMine", "user").await;
    assert!(ids(&mine.json).is_empty());
    let mine = app.get("/listMine?includeArchived=true", "user").await;
    assert_eq!(ids(&mine.json), vec![list_id.as_str()]);
    assert_eq!(mine.json["itemList"][0]["isArchived"], true);

    let list = app.get(&format!("/get?id={list_id}"), "owner").await;
    assert_eq!(list.json["items"].as_array().unwrap().len(), 1);

    let deleted = app.delete("/delete", "owner", json!({"id": list_id})).await;
    assert_eq!(deleted.json["deleted"], true);
    let gone = app.get(&format!("/get?id={list_id}"), "owner").await;
    assert_eq!(gone.error_code(), "listNotFound");
    assert!(app.store.is_empty().await);
}
