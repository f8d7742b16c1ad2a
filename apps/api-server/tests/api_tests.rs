//! API integration tests.
//!
//! The full HTTP surface is exercised against in-memory state: auth
//! flows, ownership enforcement, counters and pagination.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::TimeDelta;
use serde_json::{Value, json};
use uuid::Uuid;

use api_server::config::UploadConfig;
use api_server::handlers::configure_routes;
use api_server::state::AppState;
use quill_core::domain::{Role, User};
use quill_core::ports::{BaseRepository, PasswordService, TokenService};
use quill_infra::JwtConfig;

fn test_state() -> AppState {
    let upload = UploadConfig {
        dir: std::env::temp_dir()
            .join(format!("quill-test-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
        max_bytes: 1024 * 1024,
    };
    AppState::in_memory(
        JwtConfig {
            secret: "integration-test-secret".to_string(),
            lifetime: TimeDelta::hours(1),
        },
        &upload,
    )
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

async fn register_user<S, B>(app: &S, username: &str, email: &str) -> (String, Uuid)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": "secret123",
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    let token = body["token"].as_str().unwrap().to_string();
    let id = Uuid::parse_str(body["data"]["user"]["id"].as_str().unwrap()).unwrap();
    (token, id)
}

async fn create_post<S, B>(app: &S, token: &str, title: &str) -> Uuid
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "title": title,
            "content": "This is my first post.",
            "category": "general",
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    Uuid::parse_str(body["data"]["post"]["id"].as_str().unwrap()).unwrap()
}

/// Insert an admin directly through the state and mint their token.
async fn admin_token(state: &AppState) -> String {
    let mut admin = User::new(
        "moderator".to_string(),
        "moderator@example.com".to_string(),
        state.passwords.hash("adminpass1").unwrap(),
    );
    admin.role = Role::Admin;
    let admin = state.users.insert(admin).await.unwrap();
    state.tokens.issue(admin.id).unwrap()
}

// ---------------------------------------------------------------------------
// Auth

#[actix_web::test]
async fn register_login_me_resolve_the_same_user() {
    let state = test_state();
    let app = test_app!(state);

    let (_, registered_id) = register_user(&app, "alice", "alice@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "alice@example.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["data"]["user"]["id"].as_str().unwrap(),
        registered_id.to_string()
    );
    assert_eq!(body["data"]["user"]["role"], "user");
    assert_eq!(body["data"]["user"]["avatar"], "");
}

#[actix_web::test]
async fn duplicate_email_or_username_is_rejected() {
    let state = test_state();
    let app = test_app!(state);

    register_user(&app, "alice", "alice@example.com").await;

    // Same email, different username.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "secret123",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");

    // Same username, different email.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "alice",
            "email": "alice2@example.com",
            "password": "secret123",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn registration_validates_fields() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "al",
            "email": "not-an-email",
            "password": "short",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("Username"));
}

#[actix_web::test]
async fn login_rejects_wrong_credentials_uniformly() {
    let state = test_state();
    let app = test_app!(state);

    register_user(&app, "alice", "alice@example.com").await;

    let wrong_password = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "alice@example.com", "password": "wrongpass"}))
        .to_request();
    let resp = test::call_service(&app, wrong_password).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let wrong_pw_body: Value = test::read_body_json(resp).await;

    let unknown_email = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "nobody@example.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, unknown_email).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: Value = test::read_body_json(resp).await;

    // Neither response reveals which credential was wrong.
    assert_eq!(wrong_pw_body["message"], unknown_body["message"]);
}

#[actix_web::test]
async fn missing_or_garbage_tokens_are_unauthenticated() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme counts as no token at all.
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", "Basic abc123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn token_of_a_deleted_user_stops_working() {
    let state = test_state();
    let app = test_app!(state);

    let (token, id) = register_user(&app, "ghost", "ghost@example.com").await;
    state.users.delete(id).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn role_changes_take_effect_on_the_next_request() {
    let state = test_state();
    let app = test_app!(state);

    let (owner_token, _) = register_user(&app, "alice", "alice@example.com").await;
    let (other_token, other_id) = register_user(&app, "bob", "bob@example.com").await;
    let post_id = create_post(&app, &owner_token, "Hello World").await;

    // Bob cannot delete Alice's post...
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {other_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // ...until his stored role changes. Same token, fresh lookup.
    let mut bob = state.users.find_by_id(other_id).await.unwrap().unwrap();
    bob.role = Role::Admin;
    state.users.update(bob).await.unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {other_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Posts

#[actix_web::test]
async fn post_lifecycle_enforces_ownership() {
    let state = test_state();
    let app = test_app!(state);

    let (a_token, a_id) = register_user(&app, "alice", "alice@example.com").await;
    let (b_token, _) = register_user(&app, "bob", "bob@example.com").await;

    // Create as A.
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {a_token}")))
        .set_json(json!({
            "title": "Hello World",
            "content": "This is my first post.",
            "category": "general",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let post = &body["data"]["post"];
    assert_eq!(post["author"]["id"].as_str().unwrap(), a_id.to_string());
    assert_eq!(post["viewCount"], 0);
    let post_id = Uuid::parse_str(post["id"].as_str().unwrap()).unwrap();

    // Two public reads bump the view count to 2.
    for expected in 1..=2 {
        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{post_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["post"]["viewCount"], expected);
    }

    // B cannot update A's post.
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {b_token}")))
        .set_json(json!({
            "title": "Hijacked",
            "content": "This content is long enough.",
            "category": "general",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The owner can.
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {a_token}")))
        .set_json(json!({
            "title": "Hello Again",
            "content": "This is my first post, edited.",
            "category": "general",
            "status": "published",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["post"]["title"], "Hello Again");
    assert_eq!(body["data"]["post"]["status"], "published");
    // Authorship never moves on update.
    assert_eq!(
        body["data"]["post"]["author"]["id"].as_str().unwrap(),
        a_id.to_string()
    );

    // An admin can delete the post - but could not have updated it.
    let admin = admin_token(&state).await;
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {admin}")))
        .set_json(json!({
            "title": "Admin edit",
            "content": "Admins do not get to edit.",
            "category": "general",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {admin}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn post_like_is_a_plain_counter() {
    let state = test_state();
    let app = test_app!(state);

    let (token, _) = register_user(&app, "alice", "alice@example.com").await;
    let post_id = create_post(&app, &token, "Counting likes").await;

    // Anonymous likes are rejected.
    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/like"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The same user liking twice counts twice: no toggle here.
    for expected in 1..=2 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{post_id}/like"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["likeCount"], expected);
    }
}

#[actix_web::test]
async fn post_listing_paginates_and_filters() {
    let state = test_state();
    let app = test_app!(state);

    let (token, author_id) = register_user(&app, "prolific", "prolific@example.com").await;
    for i in 0..15 {
        create_post(&app, &token, &format!("Post number {i}")).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/posts?page=1&limit=10")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["pagination"]["total"], 15);
    assert_eq!(body["data"]["pagination"]["pages"], 2);

    let req = test::TestRequest::get()
        .uri("/api/posts?page=2&limit=10")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["pagination"]["page"], 2);

    // Author filter matches everything here, a random author nothing.
    let req = test::TestRequest::get()
        .uri(&format!("/api/posts?author={author_id}&limit=100"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 15);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts?author={}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[actix_web::test]
async fn post_validation_failures_are_400s() {
    let state = test_state();
    let app = test_app!(state);

    let (token, _) = register_user(&app, "alice", "alice@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "title": "x",
            "content": "too short",
            "category": "",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
}

// ---------------------------------------------------------------------------
// Comments

#[actix_web::test]
async fn comment_creation_skips_the_post_existence_check() {
    let state = test_state();
    let app = test_app!(state);

    let (token, _) = register_user(&app, "alice", "alice@example.com").await;

    // Known gap, reproduced faithfully: the post id is never checked.
    let phantom_post = Uuid::new_v4();
    let req = test::TestRequest::post()
        .uri("/api/comments")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"content": "Shouting into the void", "post": phantom_post}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["data"]["comment"]["post"].as_str().unwrap(),
        phantom_post.to_string()
    );
}

#[actix_web::test]
async fn comment_update_is_owner_only_and_delete_extends_to_admins() {
    let state = test_state();
    let app = test_app!(state);

    let (a_token, _) = register_user(&app, "alice", "alice@example.com").await;
    let (b_token, _) = register_user(&app, "bob", "bob@example.com").await;
    let post_id = create_post(&app, &a_token, "A post worth discussing").await;

    let req = test::TestRequest::post()
        .uri("/api/comments")
        .insert_header(("Authorization", format!("Bearer {a_token}")))
        .set_json(json!({"content": "First!", "post": post_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let comment_id = body["data"]["comment"]["id"].as_str().unwrap().to_string();

    // B cannot edit A's comment; neither can an admin.
    let req = test::TestRequest::put()
        .uri(&format!("/api/comments/{comment_id}"))
        .insert_header(("Authorization", format!("Bearer {b_token}")))
        .set_json(json!({"content": "Edited by a stranger"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let admin = admin_token(&state).await;
    let req = test::TestRequest::put()
        .uri(&format!("/api/comments/{comment_id}"))
        .insert_header(("Authorization", format!("Bearer {admin}")))
        .set_json(json!({"content": "Edited by an admin"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // A edits their own comment.
    let req = test::TestRequest::put()
        .uri(&format!("/api/comments/{comment_id}"))
        .insert_header(("Authorization", format!("Bearer {a_token}")))
        .set_json(json!({"content": "First! (edited)"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // B cannot delete it, the admin can.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/comments/{comment_id}"))
        .insert_header(("Authorization", format!("Bearer {b_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/comments/{comment_id}"))
        .insert_header(("Authorization", format!("Bearer {admin}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn comment_like_toggle_is_idempotent_per_user() {
    let state = test_state();
    let app = test_app!(state);

    let (token, _) = register_user(&app, "alice", "alice@example.com").await;
    let post_id = create_post(&app, &token, "Toggle target").await;

    let req = test::TestRequest::post()
        .uri("/api/comments")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"content": "Like me", "post": post_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let comment_id = body["data"]["comment"]["id"].as_str().unwrap().to_string();

    // Like...
    let req = test::TestRequest::post()
        .uri(&format!("/api/comments/{comment_id}/like"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["likes"], 1);
    assert_eq!(body["data"]["hasLiked"], true);

    // ...and unlike: back to the original state.
    let req = test::TestRequest::post()
        .uri(&format!("/api/comments/{comment_id}/like"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["likes"], 0);
    assert_eq!(body["data"]["hasLiked"], false);
}

#[actix_web::test]
async fn deleting_a_post_orphans_its_comments() {
    let state = test_state();
    let app = test_app!(state);

    let (token, _) = register_user(&app, "alice", "alice@example.com").await;
    let post_id = create_post(&app, &token, "Doomed post").await;

    let req = test::TestRequest::post()
        .uri("/api/comments")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"content": "Will outlive the post", "post": post_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // No cascade: the comment still lists under the vanished post.
    let req = test::TestRequest::get()
        .uri(&format!("/api/comments/post/{post_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn comment_listing_paginates() {
    let state = test_state();
    let app = test_app!(state);

    let (token, _) = register_user(&app, "alice", "alice@example.com").await;
    let post_id = create_post(&app, &token, "Busy thread").await;

    for i in 0..12 {
        let req = test::TestRequest::post()
            .uri("/api/comments")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"content": format!("Comment {i}"), "post": post_id}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/comments/post/{post_id}?page=2&limit=10"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["total"], 12);
    assert_eq!(body["data"]["pagination"]["pages"], 2);
}

// ---------------------------------------------------------------------------
// Uploads

#[actix_web::test]
async fn image_upload_returns_a_reference_path() {
    let state = test_state();
    let app = test_app!(state);

    let (token, _) = register_user(&app, "alice", "alice@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/uploads/image")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header(("Content-Type", "image/png"))
        .set_payload(&b"fake-png-bytes"[..])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let path = body["data"]["path"].as_str().unwrap();
    assert!(path.starts_with("/uploads/"));
    assert!(path.ends_with(".png"));
}

#[actix_web::test]
async fn non_image_uploads_are_rejected() {
    let state = test_state();
    let app = test_app!(state);

    let (token, _) = register_user(&app, "alice", "alice@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/uploads/image")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header(("Content-Type", "text/plain"))
        .set_payload(&b"plain text"[..])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // And anonymous uploads never reach storage.
    let req = test::TestRequest::post()
        .uri("/api/uploads/image")
        .insert_header(("Content-Type", "image/png"))
        .set_payload(&b"fake"[..])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
