//! HTTP handlers and route configuration.

mod auth;
mod catalog;
mod comments;
mod health;
mod posts;
mod profiles;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;

/// Malformed JSON bodies are answered with problem details too.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts and their comments
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::create))
                    .route("/{post_id}", web::get().to(posts::detail))
                    .route("/{post_id}", web::put().to(posts::edit))
                    .route("/{post_id}", web::delete().to(posts::delete))
                    .route("/{post_id}/comments", web::post().to(comments::add))
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::put().to(comments::edit),
                    )
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::delete().to(comments::delete),
                    ),
            )
            // Catalogue
            .service(
                web::scope("/categories")
                    .route("", web::get().to(catalog::list_categories))
                    .route("", web::post().to(catalog::create_category))
                    .route("/{slug}", web::get().to(catalog::category_posts)),
            )
            .service(
                web::scope("/locations")
                    .route("", web::get().to(catalog::list_locations))
                    .route("", web::post().to(catalog::create_location)),
            )
            // Profiles
            .service(
                web::scope("/profile")
                    .route("", web::put().to(profiles::edit_profile))
                    .route("/{username}", web::get().to(profiles::profile)),
            ),
    );
}
