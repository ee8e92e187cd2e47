use super::BlogService;
use crate::domain::{Category, CategoryDraft, Location};
use crate::error::DomainError;

impl BlogService {
    pub async fn published_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.repos.categories.list_published().await?)
    }

    pub async fn published_locations(&self) -> Result<Vec<Location>, DomainError> {
        Ok(self.repos.locations.list_published().await?)
    }

    pub async fn create_category(&self, draft: CategoryDraft) -> Result<Category, DomainError> {
        draft.validate()?;
        if self.repos.categories.find_by_slug(&draft.slug).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "Category slug '{}' already exists",
                draft.slug
            )));
        }

        let category = self.repos.categories.save(Category::new(draft)).await?;
        tracing::info!(slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn create_location(
        &self,
        name: String,
        is_published: bool,
    ) -> Result<Location, DomainError> {
        let location = Location::new(name, is_published)?;
        let location = self.repos.locations.save(location).await?;
        tracing::info!(location_id = %location.id, name = %location.name, "Location created");
        Ok(location)
    }
}
