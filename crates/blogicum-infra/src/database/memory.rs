//! In-memory repositories - used when no database is configured, and in tests.
//!
//! All repositories created from one [`InMemoryStore`] share the same tables,
//! so deletes cascade the way the SQL schema does.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogicum_core::domain::{
    Category, Comment, CommentView, Location, Page, Post, PostSummary, User,
};
use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostQuery,
    PostRepository, UserRepository,
};
use blogicum_core::service::Repositories;

use super::mask_email;

#[derive(Default)]
pub struct Tables {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    locations: HashMap<Uuid, Location>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

impl Tables {
    fn summarize(&self, post: &Post) -> PostSummary {
        PostSummary {
            post: post.clone(),
            author_username: self
                .users
                .get(&post.author_id)
                .map(|u| u.username.clone())
                .unwrap_or_default(),
            category: post
                .category_id
                .and_then(|id| self.categories.get(&id).cloned()),
            location: post
                .location_id
                .and_then(|id| self.locations.get(&id).cloned()),
            comment_count: self
                .comments
                .values()
                .filter(|c| c.post_id == post.id)
                .count() as u64,
        }
    }
}

/// A record type kept in [`Tables`].
pub trait Stored: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn table(tables: &Tables) -> &HashMap<Uuid, Self>;
    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self>;

    /// Reject a write that would break a unique column.
    fn check_unique(&self, _tables: &Tables) -> Result<(), RepoError> {
        Ok(())
    }

    /// Remove the record and apply the referential actions of the schema.
    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        Self::table_mut(tables).remove(&id).is_some()
    }
}

impl Stored for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.users
    }

    fn check_unique(&self, tables: &Tables) -> Result<(), RepoError> {
        let clash = tables.users.values().any(|u| {
            u.id != self.id && (u.username == self.username || u.email == self.email)
        });
        if clash {
            return Err(RepoError::Constraint("User already exists".to_string()));
        }
        Ok(())
    }

    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        if tables.users.remove(&id).is_none() {
            return false;
        }
        let owned: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            Post::remove(tables, post_id);
        }
        tables.comments.retain(|_, c| c.author_id != id);
        true
    }
}

impl Stored for Category {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.categories
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.categories
    }

    fn check_unique(&self, tables: &Tables) -> Result<(), RepoError> {
        if tables
            .categories
            .values()
            .any(|c| c.id != self.id && c.slug == self.slug)
        {
            return Err(RepoError::Constraint(format!(
                "Category slug '{}' already exists",
                self.slug
            )));
        }
        Ok(())
    }

    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        if tables.categories.remove(&id).is_none() {
            return false;
        }
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        true
    }
}

impl Stored for Location {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.locations
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.locations
    }

    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        if tables.locations.remove(&id).is_none() {
            return false;
        }
        for post in tables.posts.values_mut() {
            if post.location_id == Some(id) {
                post.location_id = None;
            }
        }
        true
    }
}

impl Stored for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.posts
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.posts
    }

    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        if tables.posts.remove(&id).is_none() {
            return false;
        }
        tables.comments.retain(|_, c| c.post_id != id);
        true
    }
}

impl Stored for Comment {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.comments
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.comments
    }
}

/// Generic in-memory repository over one table of a shared store.
pub struct InMemoryRepository<T> {
    tables: Arc<RwLock<Tables>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> InMemoryRepository<T> {
    fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self {
            tables,
            _record: PhantomData,
        }
    }
}

pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryCategoryRepository = InMemoryRepository<Category>;
pub type InMemoryLocationRepository = InMemoryRepository<Location>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;

/// Shared tables plus constructors for the repositories over them.
///
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository<T: Stored>(&self) -> InMemoryRepository<T> {
        InMemoryRepository::new(self.tables.clone())
    }

    /// Every repository the blog service needs, all backed by this store.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.repository::<User>()),
            categories: Arc::new(self.repository::<Category>()),
            locations: Arc::new(self.repository::<Location>()),
            posts: Arc::new(self.repository::<Post>()),
            comments: Arc::new(self.repository::<Comment>()),
        }
    }
}

#[async_trait]
impl<T: Stored> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let tables = self.tables.read().await;
        Ok(T::table(&tables).get(&id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let mut tables = self.tables.write().await;
        entity.check_unique(&tables)?;
        T::table_mut(&mut tables).insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if T::remove(&mut tables, id) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn list_published(&self) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables
            .categories
            .values()
            .filter(|c| c.is_published)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.created_at);
        Ok(categories)
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn list_published(&self) -> Result<Vec<Location>, RepoError> {
        let tables = self.tables.read().await;
        let mut locations: Vec<Location> = tables
            .locations
            .values()
            .filter(|l| l.is_published)
            .cloned()
            .collect();
        locations.sort_by_key(|l| l.created_at);
        Ok(locations)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Page<PostSummary>, RepoError> {
        let tables = self.tables.read().await;

        let mut matched: Vec<&Post> = tables
            .posts
            .values()
            .filter(|p| query.author_id.is_none_or(|id| p.author_id == id))
            .filter(|p| query.category_id.is_none_or(|id| p.category_id == Some(id)))
            .filter(|p| {
                let category = p.category_id.and_then(|id| tables.categories.get(&id));
                query.visibility.admits(p, category, query.now)
            })
            .collect();
        matched.sort_by(|a, b| {
            b.pub_date
                .cmp(&a.pub_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(usize::try_from(query.page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.page.per_page).unwrap_or(usize::MAX))
            .map(|p| tables.summarize(p))
            .collect();

        Ok(Page::new(items, query.page, total))
    }

    async fn find_summary(&self, id: Uuid) -> Result<Option<PostSummary>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).map(|p| tables.summarize(p)))
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentView>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<CommentView> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .map(|c| CommentView {
                comment: c.clone(),
                author_username: tables
                    .users
                    .get(&c.author_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
            })
            .collect();
        comments.sort_by_key(|c| c.comment.created_at);
        Ok(comments)
    }

    async fn find_for_post(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .get(&comment_id)
            .filter(|c| c.post_id == post_id)
            .cloned())
    }
}
