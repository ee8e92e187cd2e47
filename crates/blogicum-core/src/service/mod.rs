//! Blog use-cases: the policies applied on top of the repositories.

mod catalog;
mod comments;
mod posts;
mod profiles;

use std::sync::Arc;

use crate::domain::PageRequest;
use crate::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};

pub use posts::PostDetail;
pub use profiles::Profile;

/// Default number of posts per listing page.
pub const DEFAULT_POSTS_PER_PAGE: u64 = 10;

/// Repository handles the use-cases work with.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

/// Entry point for every blog operation.
#[derive(Clone)]
pub struct BlogService {
    repos: Repositories,
    posts_per_page: u64,
}

impl BlogService {
    pub fn new(repos: Repositories, posts_per_page: u64) -> Self {
        Self {
            repos,
            posts_per_page: posts_per_page.max(1),
        }
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    fn page(&self, page: Option<u64>) -> PageRequest {
        PageRequest::new(page.unwrap_or(1), self.posts_per_page)
    }
}
