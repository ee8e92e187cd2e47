//! Profile handlers.

use actix_web::{HttpResponse, web};

use blogicum_core::domain::ProfileChanges;
use blogicum_shared::dto::{PageQuery, ProfileResponse, UpdateProfileRequest};

use super::views;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/profile/{username}?page=
pub async fn profile(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let profile = state
        .blog
        .profile(viewer.user_id(), &path, query.page)
        .await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        profile: views::user_response(profile.user),
        posts: views::page_response(profile.posts, views::post_response),
    }))
}

/// PUT /api/profile
pub async fn edit_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .blog
        .edit_profile(
            identity.user_id,
            ProfileChanges {
                username: req.username,
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(views::user_response(user)))
}
