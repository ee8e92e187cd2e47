use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::{Value, json};

use blogicum_core::domain::{Category, CategoryDraft, Post, PostDraft, User};
use blogicum_core::ports::{PasswordService, TokenService};
use blogicum_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

use super::{configure_routes, json_config};
use crate::state::AppState;

struct TestContext {
    state: AppState,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
    author: User,
    reader: User,
    category: Category,
}

impl TestContext {
    async fn new() -> Self {
        let state = AppState::in_memory(10);
        let author = state
            .blog
            .register(User::new("author".into(), "author@example.com".into(), "x".into()))
            .await
            .unwrap();
        let reader = state
            .blog
            .register(User::new("reader".into(), "reader@example.com".into(), "x".into()))
            .await
            .unwrap();
        let category = state
            .blog
            .create_category(CategoryDraft {
                title: "Travel".into(),
                description: "Trips".into(),
                slug: "travel".into(),
                is_published: true,
            })
            .await
            .unwrap();

        Self {
            state,
            tokens: Arc::new(JwtTokenService::new(JwtConfig::default())),
            passwords: Arc::new(Argon2PasswordService::new()),
            author,
            reader,
            category,
        }
    }

    fn configure(&self) -> impl FnOnce(&mut web::ServiceConfig) {
        let state = self.state.clone();
        let tokens = self.tokens.clone();
        let passwords = self.passwords.clone();
        move |cfg: &mut web::ServiceConfig| {
            cfg.app_data(web::Data::new(state))
                .app_data(web::Data::new(tokens))
                .app_data(web::Data::new(passwords))
                .app_data(json_config());
            configure_routes(cfg);
        }
    }

    fn bearer(&self, user: &User) -> (header::HeaderName, String) {
        let token = self
            .tokens
            .generate_token(user.id, &user.username, user.roles())
            .unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    async fn post(&self, pub_date: DateTime<Utc>, is_published: bool) -> Post {
        self.state
            .blog
            .create_post(
                self.author.id,
                PostDraft {
                    title: "Lake".into(),
                    text: "Cold water".into(),
                    pub_date,
                    image: None,
                    location_id: None,
                    category_id: Some(self.category.id),
                    is_published,
                },
            )
            .await
            .unwrap()
    }

    async fn published_post(&self) -> Post {
        self.post(Utc::now() - TimeDelta::hours(1), true).await
    }

    fn post_body(&self, title: &str) -> Value {
        json!({
            "title": title,
            "text": "Updated text",
            "pub_date": (Utc::now() - TimeDelta::hours(1)).to_rfc3339(),
            "category_id": self.category.id,
        })
    }
}

#[actix_web::test]
async fn test_index_lists_only_public_posts() {
    let ctx = TestContext::new().await;
    ctx.published_post().await;
    ctx.post(Utc::now() - TimeDelta::hours(1), false).await;
    ctx.post(Utc::now() + TimeDelta::days(1), true).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["author"], "author");
}

#[actix_web::test]
async fn test_scheduled_post_detail_visible_only_to_author() {
    let ctx = TestContext::new().await;
    let post = ctx.post(Utc::now() + TimeDelta::days(1), true).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;
    let uri = format!("/api/posts/{}", post.id);

    let anonymous = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let reader = test::TestRequest::get()
        .uri(&uri)
        .insert_header(ctx.bearer(&ctx.reader))
        .to_request();
    assert_eq!(test::call_service(&app, reader).await.status(), StatusCode::NOT_FOUND);

    let author = test::TestRequest::get()
        .uri(&uri)
        .insert_header(ctx.bearer(&ctx.author))
        .to_request();
    assert_eq!(test::call_service(&app, author).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_non_author_edit_redirects_to_post() {
    let ctx = TestContext::new().await;
    let post = ctx.published_post().await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;
    let uri = format!("/api/posts/{}", post.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(ctx.bearer(&ctx.reader))
        .set_json(ctx.post_body("Hijacked"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), uri.as_str());

    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(body["post"]["title"], "Lake");
}

#[actix_web::test]
async fn test_author_edit_is_applied() {
    let ctx = TestContext::new().await;
    let post = ctx.published_post().await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(ctx.bearer(&ctx.author))
        .set_json(ctx.post_body("Renamed"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["author"], "author");
}

#[actix_web::test]
async fn test_delete_post_redirects_stranger_and_removes_for_author() {
    let ctx = TestContext::new().await;
    let post = ctx.published_post().await;
    ctx.state
        .blog
        .add_comment(ctx.reader.id, post.id, "Nice".into())
        .await
        .unwrap();
    let app = test::init_service(App::new().configure(ctx.configure())).await;
    let uri = format!("/api/posts/{}", post.id);

    let stranger = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(ctx.bearer(&ctx.reader))
        .to_request();
    assert_eq!(test::call_service(&app, stranger).await.status(), StatusCode::SEE_OTHER);

    let author = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(ctx.bearer(&ctx.author))
        .to_request();
    assert_eq!(test::call_service(&app, author).await.status(), StatusCode::OK);

    let gone = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    assert!(
        ctx.state
            .blog
            .repositories()
            .comments
            .list_for_post(post.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[actix_web::test]
async fn test_create_post_requires_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(ctx.post_body("Anonymous"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_post_sets_author_from_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(ctx.bearer(&ctx.reader))
        .set_json(ctx.post_body("Mine"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["author"], "reader");
    assert_eq!(body["category"]["slug"], "travel");
}

#[actix_web::test]
async fn test_malformed_body_is_problem_details() {
    let ctx = TestContext::new().await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(ctx.bearer(&ctx.author))
        .set_json(json!({ "title": "No text" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_comment_ownership_redirects() {
    let ctx = TestContext::new().await;
    let post = ctx.published_post().await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .insert_header(ctx.bearer(&ctx.reader))
        .set_json(json!({ "text": "First!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let comment: Value = test::read_body_json(resp).await;
    assert_eq!(comment["author"], "reader");

    let req = test::TestRequest::put()
        .uri(&format!(
            "/api/posts/{}/comments/{}",
            post.id,
            comment["id"].as_str().unwrap()
        ))
        .insert_header(ctx.bearer(&ctx.author))
        .set_json(json!({ "text": "Edited by someone else" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        format!("/api/posts/{}", post.id).as_str()
    );

    let detail: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", post.id))
            .to_request(),
    )
    .await;
    assert_eq!(detail["post"]["comment_count"], 1);
    assert_eq!(detail["comments"][0]["text"], "First!");
}

#[actix_web::test]
async fn test_catalogue_creation_is_staff_only() {
    let ctx = TestContext::new().await;
    let mut staff = User::new("editor".into(), "editor@example.com".into(), "x".into());
    staff.is_staff = true;
    let staff = ctx.state.blog.register(staff).await.unwrap();
    let app = test::init_service(App::new().configure(ctx.configure())).await;
    let body = json!({ "title": "Food", "slug": "food" });

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(ctx.bearer(&ctx.reader))
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(ctx.bearer(&staff))
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(ctx.bearer(&staff))
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_unpublished_category_feed_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.state
        .blog
        .create_category(CategoryDraft {
            title: "Hidden".into(),
            description: String::new(),
            slug: "hidden".into(),
            is_published: false,
        })
        .await
        .unwrap();
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let hidden = test::TestRequest::get().uri("/api/categories/hidden").to_request();
    assert_eq!(test::call_service(&app, hidden).await.status(), StatusCode::NOT_FOUND);

    let visible = test::TestRequest::get().uri("/api/categories/travel").to_request();
    assert_eq!(test::call_service(&app, visible).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_profile_owner_sees_drafts() {
    let ctx = TestContext::new().await;
    ctx.published_post().await;
    ctx.post(Utc::now() - TimeDelta::hours(1), false).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let anonymous: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/profile/author").to_request(),
    )
    .await;
    assert_eq!(anonymous["posts"]["total"], 1);

    let owner: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/profile/author")
            .insert_header(ctx.bearer(&ctx.author))
            .to_request(),
    )
    .await;
    assert_eq!(owner["posts"]["total"], 2);
    assert_eq!(owner["profile"]["username"], "author");
}

#[actix_web::test]
async fn test_register_login_and_me() {
    let ctx = TestContext::new().await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "newcomer",
            "email": "newcomer@example.com",
            "password": "correct-horse",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let wrong = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "newcomer", "password": "wrong-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, wrong).await.status(), StatusCode::UNAUTHORIZED);

    let login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "newcomer", "password": "correct-horse" }))
        .to_request();
    let auth: Value = test::call_and_read_body_json(&app, login).await;
    let token = auth["access_token"].as_str().unwrap();

    let me: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(me["username"], "newcomer");
}

#[actix_web::test]
async fn test_register_rejects_short_password() {
    let ctx = TestContext::new().await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "shorty",
            "email": "shorty@example.com",
            "password": "short",
        }))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_page_past_the_end_is_empty() {
    let ctx = TestContext::new().await;
    ctx.published_post().await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    for uri in [
        "/api/posts?page=18446744073709551615",
        "/api/categories/travel?page=18446744073709551615",
        "/api/profile/author?page=18446744073709551615",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");

        let body: Value = test::read_body_json(resp).await;
        let page = if uri.starts_with("/api/posts") {
            &body
        } else {
            &body["posts"]
        };
        assert_eq!(page["total"], 1, "{uri}");
        assert!(page["items"].as_array().unwrap().is_empty(), "{uri}");
    }
}
