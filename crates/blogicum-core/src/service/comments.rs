use uuid::Uuid;

use super::BlogService;
use crate::domain::{Comment, validation};
use crate::error::DomainError;
use crate::policy::{Outcome, authorize};

impl BlogService {
    /// Comment on a post the author is able to see.
    pub async fn add_comment(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        text: String,
    ) -> Result<Comment, DomainError> {
        self.visible_post(Some(author_id), post_id).await?;

        let comment = Comment::new(post_id, author_id, text)?;
        let comment = self.repos.comments.save(comment).await?;
        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment added");
        Ok(comment)
    }

    pub async fn edit_comment(
        &self,
        requester: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
        text: String,
    ) -> Result<Outcome<Comment>, DomainError> {
        let mut comment = self.find_comment(post_id, comment_id).await?;
        if let Err(redirect) = authorize(requester, &comment) {
            tracing::warn!(comment_id = %comment_id, requester = %requester, "Comment edit refused");
            return Ok(Outcome::Redirected(redirect));
        }

        validation::not_blank("text", &text)?;
        comment.text = text;
        Ok(Outcome::Applied(self.repos.comments.save(comment).await?))
    }

    pub async fn delete_comment(
        &self,
        requester: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Outcome<()>, DomainError> {
        let comment = self.find_comment(post_id, comment_id).await?;
        if let Err(redirect) = authorize(requester, &comment) {
            tracing::warn!(comment_id = %comment_id, requester = %requester, "Comment delete refused");
            return Ok(Outcome::Redirected(redirect));
        }

        self.repos.comments.delete(comment_id).await?;
        tracing::info!(comment_id = %comment_id, post_id = %post_id, "Comment deleted");
        Ok(Outcome::Applied(()))
    }

    async fn find_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment, DomainError> {
        self.repos
            .comments
            .find_for_post(post_id, comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }
}
