use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation;
use super::{Category, Location};
use crate::error::DomainError;

/// Post entity - a blog entry that becomes public at `pub_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, draft: PostDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: draft.title,
            text: draft.text,
            pub_date: draft.pub_date,
            image: draft.image,
            location_id: draft.location_id,
            category_id: draft.category_id,
            is_published: draft.is_published,
            created_at: Utc::now(),
        }
    }

    /// Replace the editable fields. Authorship and creation time never change.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.text = draft.text;
        self.pub_date = draft.pub_date;
        self.image = draft.image;
        self.location_id = draft.location_id;
        self.category_id = draft.category_id;
        self.is_published = draft.is_published;
    }
}

/// The author-supplied part of a post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        validation::title("title", &self.title)?;
        validation::not_blank("text", &self.text)
    }
}

/// A post together with the records a listing or detail view displays.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post: Post,
    pub author_username: String,
    pub category: Option<Category>,
    pub location: Option<Location>,
    pub comment_count: u64,
}
