use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation;
use crate::error::DomainError;

/// Category entity - groups posts under a URL slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(draft: CategoryDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            slug: draft.slug,
            is_published: draft.is_published,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}

impl CategoryDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        validation::title("title", &self.title)?;
        validation::slug(&self.slug)
    }
}
