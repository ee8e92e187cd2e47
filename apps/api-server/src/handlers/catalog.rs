//! Category and location handlers.

use actix_web::{HttpResponse, web};

use blogicum_core::domain::CategoryDraft;
use blogicum_shared::dto::{
    CategoryPostsResponse, CreateCategoryRequest, CreateLocationRequest, PageQuery,
};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.blog.published_categories().await?;
    let body: Vec<_> = categories
        .into_iter()
        .map(views::category_response)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/categories/{slug}?page=
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let (category, posts) = state.blog.category_posts(&path, query.page).await?;

    Ok(HttpResponse::Ok().json(CategoryPostsResponse {
        category: views::category_response(category),
        posts: views::page_response(posts, views::post_response),
    }))
}

/// POST /api/categories - staff only
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    identity.require_staff()?;

    let req = body.into_inner();
    let category = state
        .blog
        .create_category(CategoryDraft {
            title: req.title,
            description: req.description,
            slug: req.slug,
            is_published: req.is_published,
        })
        .await?;

    Ok(HttpResponse::Created().json(views::category_response(category)))
}

/// GET /api/locations
pub async fn list_locations(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let locations = state.blog.published_locations().await?;
    let body: Vec<_> = locations
        .into_iter()
        .map(views::location_response)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/locations - staff only
pub async fn create_location(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateLocationRequest>,
) -> AppResult<HttpResponse> {
    identity.require_staff()?;

    let req = body.into_inner();
    let location = state
        .blog
        .create_location(req.name, req.is_published)
        .await?;

    Ok(HttpResponse::Created().json(views::location_response(location)))
}
