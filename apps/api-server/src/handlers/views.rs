//! Domain to DTO conversions and redirect responses.

use actix_web::{HttpResponse, http::header};

use blogicum_core::domain::{Category, CommentView, Location, Page, PostSummary, User};
use blogicum_core::policy::Redirect;
use blogicum_shared::PageResponse;
use blogicum_shared::dto::{
    CategoryResponse, CommentResponse, LocationResponse, PostResponse, UserResponse,
};

/// `303 See Other` pointing at the target of a refused mutation.
pub fn redirect(redirect: Redirect) -> HttpResponse {
    match redirect {
        Redirect::PostDetail { post_id } => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, format!("/api/posts/{post_id}")))
            .finish(),
    }
}

pub fn post_response(summary: PostSummary) -> PostResponse {
    let post = summary.post;
    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        image: post.image,
        author: summary.author_username,
        category: summary.category.map(category_response),
        // Unpublished locations are not shown on posts.
        location: summary
            .location
            .filter(|l| l.is_published)
            .map(location_response),
        is_published: post.is_published,
        comment_count: summary.comment_count,
        created_at: post.created_at,
    }
}

pub fn category_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title,
        description: category.description,
        slug: category.slug,
        is_published: category.is_published,
        created_at: category.created_at,
    }
}

pub fn location_response(location: Location) -> LocationResponse {
    LocationResponse {
        id: location.id,
        name: location.name,
        is_published: location.is_published,
        created_at: location.created_at,
    }
}

pub fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        created_at: user.created_at,
    }
}

pub fn comment_response(view: CommentView) -> CommentResponse {
    let comment = view.comment;
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author: view.author_username,
        text: comment.text,
        created_at: comment.created_at,
    }
}

pub fn page_response<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageResponse<U> {
    let total_pages = page.total_pages();
    PageResponse {
        items: page.items.into_iter().map(f).collect(),
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages,
    }
}
