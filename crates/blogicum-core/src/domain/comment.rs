use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation;
use crate::error::DomainError;

/// Comment entity - a reply attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: Uuid, text: String) -> Result<Self, DomainError> {
        validation::not_blank("text", &text)?;
        Ok(Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            text,
            created_at: Utc::now(),
        })
    }
}

/// Comment with the author's username, as shown under a post.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub author_username: String,
}
