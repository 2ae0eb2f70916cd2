//! Tests for the user collection handlers.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserStore;
use crate::inbound::http::path::PathPattern;
use crate::inbound::http::reply::ReplyBody;
use crate::outbound::memory::MemoryUserStore;
use actix_web::web::Bytes;
use rstest::{fixture, rstest};
use serde_json::Value;

#[fixture]
fn users() -> Arc<UserRepository> {
    Arc::new(UserRepository::new(Arc::new(MemoryUserStore::new())))
}

fn collection_request(body: &'static str) -> HandlerRequest {
    HandlerRequest::new(Default::default(), Bytes::from_static(body.as_bytes()))
}

fn item_request(id: &str, body: &'static str) -> HandlerRequest {
    let params = PathPattern::parse("/api/user/{id}")
        .expect("valid pattern")
        .matches(&format!("/api/user/{id}"))
        .expect("id path matches");
    HandlerRequest::new(params, Bytes::from_static(body.as_bytes()))
}

fn json_body(reply: &Reply) -> Value {
    match reply.body() {
        ReplyBody::Bytes(bytes) => serde_json::from_slice(bytes).expect("json body"),
        other => panic!("expected a buffered body, got {other:?}"),
    }
}

async fn create(users: &Arc<UserRepository>, body: &'static str) -> Value {
    let reply = create_user(Arc::clone(users), collection_request(body))
        .await
        .expect("create succeeds");
    assert_eq!(reply.status(), StatusCode::CREATED);
    json_body(&reply)
}

fn id_of(user: &Value) -> String {
    user.get("id")
        .and_then(Value::as_str)
        .expect("persisted user has an id")
        .to_owned()
}

#[rstest]
#[actix_web::test]
async fn create_assigns_an_id_and_sets_location(users: Arc<UserRepository>) {
    let reply = create_user(
        Arc::clone(&users),
        collection_request(r#"{"login":"x","age":5}"#),
    )
    .await
    .expect("create succeeds");

    let body = json_body(&reply);
    let id = id_of(&body);
    assert_eq!(body.get("login").and_then(Value::as_str), Some("x"));
    assert_eq!(body.get("age").and_then(Value::as_u64), Some(5));
    assert_eq!(
        reply.header(&LOCATION).and_then(|v| v.to_str().ok()),
        Some(format!("/api/user/{id}").as_str())
    );
}

#[rstest]
#[actix_web::test]
async fn created_users_can_be_read_back(users: Arc<UserRepository>) {
    let created = create(&users, r#"{"login":"x","age":5}"#).await;
    let id = id_of(&created);

    let reply = get_user(Arc::clone(&users), item_request(&id, ""))
        .await
        .expect("get succeeds");
    assert_eq!(reply.status(), StatusCode::OK);
    assert_eq!(json_body(&reply), created);
}

#[rstest]
#[case(r#"{"login":"x"}"#)]
#[case(r#"{"login":"x","age":-1}"#)]
#[case(r#"{"login":"x","age":5,"id":"abc"}"#)]
#[case(r#"{"login":"x","age":"five"}"#)]
#[case("not json")]
#[case("")]
#[actix_web::test]
async fn malformed_bodies_are_invalid_requests(
    users: Arc<UserRepository>,
    #[case] body: &'static str,
) {
    let err = create_user(Arc::clone(&users), collection_request(body))
        .await
        .expect_err("malformed body");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(users.find_all().await.expect("list").is_empty());
}

#[rstest]
#[actix_web::test]
async fn blank_logins_report_the_field(users: Arc<UserRepository>) {
    let err = create_user(users, collection_request(r#"{"login":"  ","age":5}"#))
        .await
        .expect_err("blank login");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some("login"));
}

#[rstest]
#[case("missing")]
#[case("5b24f75e5a86a170de98c1e7")]
#[actix_web::test]
async fn absent_users_are_empty_404s(users: Arc<UserRepository>, #[case] id: &str) {
    let get = get_user(Arc::clone(&users), item_request(id, ""))
        .await
        .expect("get never fails on absence");
    let put = update_user(
        Arc::clone(&users),
        item_request(id, r#"{"login":"x","age":5}"#),
    )
    .await
    .expect("update never fails on absence");
    let delete = delete_user(Arc::clone(&users), item_request(id, ""))
        .await
        .expect("delete never fails on absence");

    for reply in [get, put, delete] {
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);
        assert!(matches!(reply.body(), ReplyBody::Empty));
    }
}

#[rstest]
#[actix_web::test]
async fn repeated_updates_yield_the_same_user(users: Arc<UserRepository>) {
    let created = create(&users, r#"{"login":"x","age":5}"#).await;
    let id = id_of(&created);

    let mut results = Vec::new();
    for _ in 0..2 {
        let reply = update_user(
            Arc::clone(&users),
            item_request(&id, r#"{"login":"y","age":6}"#),
        )
        .await
        .expect("update succeeds");
        assert_eq!(reply.status(), StatusCode::OK);
        results.push(json_body(&reply));
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(id_of(&results[0]), id);
    assert_eq!(results[0].get("login").and_then(Value::as_str), Some("y"));
    assert_eq!(users.find_all().await.expect("list").len(), 1);
}

#[rstest]
#[actix_web::test]
async fn deleted_users_are_gone(users: Arc<UserRepository>) {
    let created = create(&users, r#"{"login":"x","age":5}"#).await;
    let id = id_of(&created);

    let reply = delete_user(Arc::clone(&users), item_request(&id, ""))
        .await
        .expect("delete succeeds");
    assert_eq!(reply.status(), StatusCode::NO_CONTENT);
    assert!(matches!(reply.body(), ReplyBody::Empty));

    let reply = get_user(Arc::clone(&users), item_request(&id, ""))
        .await
        .expect("get succeeds");
    assert_eq!(reply.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn list_returns_the_whole_collection(users: Arc<UserRepository>) {
    users.init().await.expect("seed");
    let reply = list_users(Arc::clone(&users), collection_request(""))
        .await
        .expect("list succeeds");
    let body = json_body(&reply);
    let mut logins: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|user| user.get("login").and_then(Value::as_str))
        .collect();
    logins.sort_unstable();
    assert_eq!(logins, vec!["admin", "ala", "test"]);
}

#[rstest]
#[case(UserStoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserStoreError::query("syntax error"), ErrorCode::InternalError)]
#[actix_web::test]
async fn store_failures_map_to_server_errors(
    #[case] failure: UserStoreError,
    #[case] expected: ErrorCode,
) {
    let mut store = MockUserStore::new();
    store
        .expect_find_all()
        .times(1)
        .return_once(move || Err(failure));
    let users = Arc::new(UserRepository::new(Arc::new(store)));

    let err = list_users(users, collection_request(""))
        .await
        .expect_err("store failure");
    assert_eq!(err.code(), expected);
}
