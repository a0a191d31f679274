//! End-to-end API tests against a live Postgres
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p blogctl-server -- --ignored
//!
//! Every test creates its own users and post, so tests can share a database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use blogctl_server::db::{create_pool, migrations, CommentRepo, LikeRepo, PostRepo, UserRepo};
use blogctl_server::{build_router, AppState, ServerConfig, SessionUser};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

struct Fixture {
    pool: PgPool,
    alice: Uuid,
    bob: Uuid,
    post: Uuid,
}

impl Fixture {
    async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("connect");
        migrations::run(&pool).await.expect("migrate");

        let alice = UserRepo::new(&pool).create("alice").await.unwrap().id;
        let bob = UserRepo::new(&pool).create("bob").await.unwrap().id;
        let post = PostRepo::new(&pool)
            .create("Test post", "Test body")
            .await
            .unwrap()
            .id;

        Self {
            pool,
            alice,
            bob,
            post,
        }
    }

    /// Router with every request acting as `user`
    fn app_as(&self, user: Uuid) -> Router {
        build_router(
            AppState::new(self.pool.clone(), SessionUser(user)),
            &ServerConfig::default(),
        )
    }
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn add_comment(fx: &Fixture, user: Uuid, message: &str, parent: Option<Uuid>) -> Value {
    let (status, body) = send(
        fx.app_as(user),
        "POST",
        &format!("/posts/{}/comments", fx.post),
        Some(json!({ "message": message, "parentId": parent })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

fn id_of(value: &Value) -> Uuid {
    value["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn post_list_includes_new_post() {
    let fx = Fixture::new().await;

    let (status, body) = send(fx.app_as(fx.alice), "GET", "/posts", None).await;

    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().unwrap();
    let ours = posts
        .iter()
        .find(|p| p["id"] == fx.post.to_string())
        .expect("post listed");
    assert_eq!(ours["title"], "Test post");
    assert!(ours.get("body").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_comment_returns_author_and_zero_likes() {
    let fx = Fixture::new().await;

    let comment = add_comment(&fx, fx.alice, "first!", None).await;

    assert_eq!(comment["message"], "first!");
    assert_eq!(comment["parentId"], Value::Null);
    assert_eq!(comment["user"]["id"], fx.alice.to_string());
    let author = UserRepo::new(&fx.pool).get(fx.alice).await.unwrap();
    assert_eq!(comment["user"]["name"], author.name.as_str());
    assert_eq!(comment["likeCount"], 0);
    assert_eq!(comment["likedByMe"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn post_detail_lists_comments_newest_first() {
    let fx = Fixture::new().await;
    let first = add_comment(&fx, fx.alice, "one", None).await;
    let second = add_comment(&fx, fx.bob, "two", None).await;
    let reply = add_comment(&fx, fx.alice, "reply", Some(id_of(&first))).await;

    let (status, body) = send(
        fx.app_as(fx.alice),
        "GET",
        &format!("/posts/{}", fx.post),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Test post");
    assert_eq!(body["body"], "Test body");

    let ids: Vec<Uuid> = body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(id_of)
        .collect();
    assert_eq!(ids, vec![id_of(&reply), id_of(&second), id_of(&first)]);
    assert_eq!(body["comments"][0]["parentId"], first["id"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_message_persists_nothing() {
    let fx = Fixture::new().await;

    for body in [json!({ "message": "" }), json!({ "message": null }), json!({})] {
        let (status, response) = send(
            fx.app_as(fx.alice),
            "POST",
            &format!("/posts/{}/comments", fx.post),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "validation_error");
    }

    let comments = CommentRepo::new(&fx.pool)
        .list_for_post(fx.post, fx.alice)
        .await
        .unwrap();
    assert!(comments.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn reply_to_comment_on_other_post_is_404() {
    let fx = Fixture::new().await;
    let other = PostRepo::new(&fx.pool).create("Other", "x").await.unwrap();
    let (_, foreign) = send(
        fx.app_as(fx.alice),
        "POST",
        &format!("/posts/{}/comments", other.id),
        Some(json!({ "message": "elsewhere" })),
    )
    .await;

    let (status, body) = send(
        fx.app_as(fx.alice),
        "POST",
        &format!("/posts/{}/comments", fx.post),
        Some(json!({ "message": "hi", "parentId": foreign["id"] })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_post_is_404() {
    let fx = Fixture::new().await;
    let missing = Uuid::new_v4();

    let (status, _) = send(fx.app_as(fx.alice), "GET", &format!("/posts/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        fx.app_as(fx.alice),
        "POST",
        &format!("/posts/{missing}/comments"),
        Some(json!({ "message": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn edit_by_owner_updates_message() {
    let fx = Fixture::new().await;
    let comment = add_comment(&fx, fx.alice, "draft", None).await;
    let id = id_of(&comment);

    let (status, body) = send(
        fx.app_as(fx.alice),
        "PUT",
        &format!("/posts/{}/comments/{}", fx.post, id),
        Some(json!({ "message": "final" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "final" }));

    let stored = CommentRepo::new(&fx.pool).get(fx.post, id).await.unwrap();
    assert_eq!(stored.message, "final");
    assert!(stored.updated_at >= stored.created_at);
}

#[tokio::test]
#[ignore = "requires database"]
async fn edit_by_other_user_is_401_and_leaves_comment() {
    let fx = Fixture::new().await;
    let comment = add_comment(&fx, fx.alice, "mine", None).await;
    let id = id_of(&comment);

    let (status, body) = send(
        fx.app_as(fx.bob),
        "PUT",
        &format!("/posts/{}/comments/{}", fx.post, id),
        Some(json!({ "message": "hijacked" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "You do not have permission to edit this comment"
    );

    let stored = CommentRepo::new(&fx.pool).get(fx.post, id).await.unwrap();
    assert_eq!(stored.message, "mine");
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_by_other_user_is_401() {
    let fx = Fixture::new().await;
    let comment = add_comment(&fx, fx.alice, "keep me", None).await;
    let id = id_of(&comment);

    let (status, _) = send(
        fx.app_as(fx.bob),
        "DELETE",
        &format!("/posts/{}/comments/{}", fx.post, id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(CommentRepo::new(&fx.pool).get(fx.post, id).await.is_ok());
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_removes_only_that_comment() {
    let fx = Fixture::new().await;
    let parent = add_comment(&fx, fx.alice, "parent", None).await;
    let sibling = add_comment(&fx, fx.bob, "sibling", None).await;
    let reply = add_comment(&fx, fx.bob, "reply", Some(id_of(&parent))).await;
    LikeRepo::new(&fx.pool)
        .toggle(fx.post, id_of(&parent), fx.bob)
        .await
        .unwrap();

    let (status, body) = send(
        fx.app_as(fx.alice),
        "DELETE",
        &format!("/posts/{}/comments/{}", fx.post, id_of(&parent)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], parent["id"]);

    let repo = CommentRepo::new(&fx.pool);
    assert!(repo.get(fx.post, id_of(&parent)).await.is_err());
    assert!(repo.get(fx.post, id_of(&sibling)).await.is_ok());

    let orphan = repo.get(fx.post, id_of(&reply)).await.unwrap();
    assert_eq!(orphan.parent_id, None);

    let likes = LikeRepo::new(&fx.pool)
        .count_for_comment(id_of(&parent))
        .await
        .unwrap();
    assert_eq!(likes, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn toggle_like_twice_restores_state() {
    let fx = Fixture::new().await;
    let comment = add_comment(&fx, fx.alice, "like me", None).await;
    let uri = format!("/posts/{}/comments/{}/toggleLike", fx.post, id_of(&comment));

    let (status, body) = send(fx.app_as(fx.bob), "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "addLike": true }));

    let (_, detail) = send(fx.app_as(fx.bob), "GET", &format!("/posts/{}", fx.post), None).await;
    assert_eq!(detail["comments"][0]["likeCount"], 1);
    assert_eq!(detail["comments"][0]["likedByMe"], true);

    let (_, detail) = send(
        fx.app_as(fx.alice),
        "GET",
        &format!("/posts/{}", fx.post),
        None,
    )
    .await;
    assert_eq!(detail["comments"][0]["likeCount"], 1);
    assert_eq!(detail["comments"][0]["likedByMe"], false);

    let (status, body) = send(fx.app_as(fx.bob), "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "addLike": false }));

    let count = LikeRepo::new(&fx.pool)
        .count_for_comment(id_of(&comment))
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn like_count_sums_likes_from_every_user() {
    let fx = Fixture::new().await;
    let carol = UserRepo::new(&fx.pool).create("carol").await.unwrap().id;
    let comment = add_comment(&fx, fx.alice, "popular", None).await;
    let uri = format!("/posts/{}/comments/{}/toggleLike", fx.post, id_of(&comment));

    for user in [fx.bob, carol] {
        let (status, body) = send(fx.app_as(user), "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "addLike": true }));
    }

    for (viewer, liked) in [(fx.alice, false), (fx.bob, true), (carol, true)] {
        let (_, detail) = send(fx.app_as(viewer), "GET", &format!("/posts/{}", fx.post), None).await;
        assert_eq!(detail["comments"][0]["likeCount"], 2);
        assert_eq!(detail["comments"][0]["likedByMe"], liked);
    }

    let count = LikeRepo::new(&fx.pool)
        .count_for_comment(id_of(&comment))
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn toggle_like_on_missing_comment_is_404() {
    let fx = Fixture::new().await;
    let uri = format!(
        "/posts/{}/comments/{}/toggleLike",
        fx.post,
        Uuid::new_v4()
    );

    let (status, _) = send(fx.app_as(fx.alice), "POST", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn comment_is_scoped_to_its_post() {
    let fx = Fixture::new().await;
    let comment = add_comment(&fx, fx.alice, "here", None).await;
    let other = PostRepo::new(&fx.pool).create("Other", "x").await.unwrap();

    let (status, _) = send(
        fx.app_as(fx.alice),
        "PUT",
        &format!("/posts/{}/comments/{}", other.id, id_of(&comment)),
        Some(json!({ "message": "moved" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
