use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation;
use crate::error::DomainError;

/// Location entity - an optional place a post is tagged with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn new(name: String, is_published: bool) -> Result<Self, DomainError> {
        validation::title("name", &name)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            is_published,
            created_at: Utc::now(),
        })
    }
}
