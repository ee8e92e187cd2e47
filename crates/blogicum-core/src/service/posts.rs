use chrono::Utc;
use uuid::Uuid;

use super::BlogService;
use crate::domain::{Category, CommentView, Page, Post, PostDraft, PostSummary};
use crate::error::DomainError;
use crate::policy::{Outcome, Visibility, authorize, is_visible};
use crate::ports::PostQuery;

/// A post page: the post and its comments, oldest first.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: PostSummary,
    pub comments: Vec<CommentView>,
}

impl BlogService {
    /// Front page feed. Only public posts are listed, even for their authors.
    pub async fn index(&self, page: Option<u64>) -> Result<Page<PostSummary>, DomainError> {
        let query = PostQuery::new(Visibility::Public, self.page(page));
        Ok(self.repos.posts.list(&query).await?)
    }

    /// Public posts of a published category.
    pub async fn category_posts(
        &self,
        slug: &str,
        page: Option<u64>,
    ) -> Result<(Category, Page<PostSummary>), DomainError> {
        let category = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let query = PostQuery::new(Visibility::Public, self.page(page)).in_category(category.id);
        let posts = self.repos.posts.list(&query).await?;
        Ok((category, posts))
    }

    pub async fn post_detail(
        &self,
        viewer: Option<Uuid>,
        post_id: Uuid,
    ) -> Result<PostDetail, DomainError> {
        let post = self.visible_post(viewer, post_id).await?;
        let comments = self.repos.comments.list_for_post(post_id).await?;
        Ok(PostDetail { post, comments })
    }

    /// Hidden posts are reported exactly like missing ones.
    pub(super) async fn visible_post(
        &self,
        viewer: Option<Uuid>,
        post_id: Uuid,
    ) -> Result<PostSummary, DomainError> {
        let now = Utc::now();
        self.repos
            .posts
            .find_summary(post_id)
            .await?
            .filter(|s| is_visible(&s.post, s.category.as_ref(), viewer, now))
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    pub async fn create_post(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, DomainError> {
        draft.validate()?;
        self.check_references(&draft).await?;

        let post = self.repos.posts.save(Post::new(author_id, draft)).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    pub async fn edit_post(
        &self,
        requester: Uuid,
        post_id: Uuid,
        draft: PostDraft,
    ) -> Result<Outcome<Post>, DomainError> {
        let mut post = self.find_post(post_id).await?;
        if let Err(redirect) = authorize(requester, &post) {
            tracing::warn!(post_id = %post_id, requester = %requester, "Edit refused: not the author");
            return Ok(Outcome::Redirected(redirect));
        }

        draft.validate()?;
        self.check_references(&draft).await?;
        post.apply(draft);

        let post = self.repos.posts.save(post).await?;
        tracing::info!(post_id = %post_id, "Post updated");
        Ok(Outcome::Applied(post))
    }

    /// Removes the post together with its comments.
    pub async fn delete_post(
        &self,
        requester: Uuid,
        post_id: Uuid,
    ) -> Result<Outcome<()>, DomainError> {
        let post = self.find_post(post_id).await?;
        if let Err(redirect) = authorize(requester, &post) {
            tracing::warn!(post_id = %post_id, requester = %requester, "Delete refused: not the author");
            return Ok(Outcome::Redirected(redirect));
        }

        self.repos.posts.delete(post_id).await?;
        tracing::info!(post_id = %post_id, "Post deleted");
        Ok(Outcome::Applied(()))
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    async fn check_references(&self, draft: &PostDraft) -> Result<(), DomainError> {
        if let Some(category_id) = draft.category_id {
            if self.repos.categories.find_by_id(category_id).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "Unknown category {category_id}"
                )));
            }
        }
        if let Some(location_id) = draft.location_id {
            if self.repos.locations.find_by_id(location_id).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "Unknown location {location_id}"
                )));
            }
        }
        Ok(())
    }
}
