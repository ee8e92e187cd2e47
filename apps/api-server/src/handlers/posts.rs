//! Post feed, detail and authoring handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::domain::PostDraft;
use blogicum_core::policy::Outcome;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{PageQuery, PostDetailResponse, PostRequest};

use super::views;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts?page=
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.blog.index(query.page).await?;
    Ok(HttpResponse::Ok().json(views::page_response(posts, views::post_response)))
}

/// GET /api/posts/{post_id}
pub async fn detail(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state.blog.post_detail(viewer.user_id(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: views::post_response(detail.post),
        comments: detail
            .comments
            .into_iter()
            .map(views::comment_response)
            .collect(),
    }))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .create_post(identity.user_id, draft(body.into_inner()))
        .await?;
    let detail = state.blog.post_detail(Some(identity.user_id), post.id).await?;

    Ok(HttpResponse::Created().json(views::post_response(detail.post)))
}

/// PUT /api/posts/{post_id}
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    match state
        .blog
        .edit_post(identity.user_id, post_id, draft(body.into_inner()))
        .await?
    {
        Outcome::Applied(post) => {
            let detail = state.blog.post_detail(Some(identity.user_id), post.id).await?;
            Ok(HttpResponse::Ok().json(views::post_response(detail.post)))
        }
        Outcome::Redirected(redirect) => Ok(views::redirect(redirect)),
    }
}

/// DELETE /api/posts/{post_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    match state.blog.delete_post(identity.user_id, post_id).await? {
        Outcome::Applied(()) => {
            Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post_id, "Post deleted")))
        }
        Outcome::Redirected(redirect) => Ok(views::redirect(redirect)),
    }
}

fn draft(req: PostRequest) -> PostDraft {
    PostDraft {
        title: req.title,
        text: req.text,
        pub_date: req.pub_date,
        image: req.image,
        location_id: req.location_id,
        category_id: req.category_id,
        is_published: req.is_published,
    }
}
