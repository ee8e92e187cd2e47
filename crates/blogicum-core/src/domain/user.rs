use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation;
use crate::error::DomainError;

/// Role granted to every registered user.
pub const ROLE_USER: &str = "user";
/// Role allowed to manage categories and locations.
pub const ROLE_STAFF: &str = "staff";

/// User entity - a registered blog author or commenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            password_hash,
            is_staff: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_names(mut self, first_name: String, last_name: String) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Roles embedded into access tokens.
    pub fn roles(&self) -> Vec<String> {
        let mut roles = vec![ROLE_USER.to_string()];
        if self.is_staff {
            roles.push(ROLE_STAFF.to_string());
        }
        roles
    }

    pub fn apply(&mut self, changes: ProfileChanges) {
        self.username = changes.username;
        self.email = changes.email;
        self.first_name = changes.first_name;
        self.last_name = changes.last_name;
        self.updated_at = Utc::now();
    }
}

/// Editable profile fields.
#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl ProfileChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        validation::username(&self.username)?;
        validation::email(&self.email)?;
        validation::max_len("first_name", &self.first_name, validation::NAME_MAX_LENGTH)?;
        validation::max_len("last_name", &self.last_name, validation::NAME_MAX_LENGTH)
    }
}
