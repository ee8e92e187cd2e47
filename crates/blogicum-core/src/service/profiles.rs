use uuid::Uuid;

use super::BlogService;
use crate::domain::{Page, PostSummary, ProfileChanges, User, validation};
use crate::error::DomainError;
use crate::policy::Visibility;
use crate::ports::PostQuery;

/// A user's page: the user and the posts the viewer may see.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub posts: Page<PostSummary>,
}

impl BlogService {
    /// The owner sees every post they wrote, drafts and scheduled ones included.
    pub async fn profile(
        &self,
        viewer: Option<Uuid>,
        username: &str,
        page: Option<u64>,
    ) -> Result<Profile, DomainError> {
        let user = self
            .repos
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let visibility = if viewer == Some(user.id) {
            Visibility::Unfiltered
        } else {
            Visibility::Public
        };
        let query = PostQuery::new(visibility, self.page(page)).by_author(user.id);
        let posts = self.repos.posts.list(&query).await?;

        Ok(Profile { user, posts })
    }

    /// Persist a newly registered user. The password is already hashed.
    pub async fn register(&self, user: User) -> Result<User, DomainError> {
        validation::username(&user.username)?;
        validation::email(&user.email)?;
        self.ensure_unique(&user.username, &user.email, None).await?;

        let user = self.repos.users.save(user).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    pub async fn edit_profile(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, DomainError> {
        changes.validate()?;
        let mut user = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", user_id))?;

        self.ensure_unique(&changes.username, &changes.email, Some(user_id))
            .await?;
        user.apply(changes);
        Ok(self.repos.users.save(user).await?)
    }

    async fn ensure_unique(
        &self,
        username: &str,
        email: &str,
        owner: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let taken_by_other = |found: Option<User>| found.is_some_and(|u| Some(u.id) != owner);

        if taken_by_other(self.repos.users.find_by_username(username).await?) {
            return Err(DomainError::Duplicate("Username already taken".to_string()));
        }
        if taken_by_other(self.repos.users.find_by_email(email).await?) {
            return Err(DomainError::Duplicate("Email already registered".to_string()));
        }
        Ok(())
    }
}
