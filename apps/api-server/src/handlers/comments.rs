//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::domain::{Comment, CommentView};
use blogicum_core::policy::Outcome;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::CommentRequest;

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{post_id}/comments
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blog
        .add_comment(identity.user_id, path.into_inner(), body.into_inner().text)
        .await?;

    Ok(HttpResponse::Created().json(view(comment, identity)))
}

/// PUT /api/posts/{post_id}/comments/{comment_id}
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    match state
        .blog
        .edit_comment(identity.user_id, post_id, comment_id, body.into_inner().text)
        .await?
    {
        Outcome::Applied(comment) => Ok(HttpResponse::Ok().json(view(comment, identity))),
        Outcome::Redirected(redirect) => Ok(views::redirect(redirect)),
    }
}

/// DELETE /api/posts/{post_id}/comments/{comment_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    match state
        .blog
        .delete_comment(identity.user_id, post_id, comment_id)
        .await?
    {
        Outcome::Applied(()) => Ok(HttpResponse::Ok()
            .json(ApiResponse::ok_with_message(comment_id, "Comment deleted"))),
        Outcome::Redirected(redirect) => Ok(views::redirect(redirect)),
    }
}

/// Only the author can reach the success paths, so the token names them.
fn view(comment: Comment, identity: Identity) -> blogicum_shared::dto::CommentResponse {
    views::comment_response(CommentView {
        comment,
        author_username: identity.username,
    })
}
