use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post};

/// Visibility filter applied to a post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Published, in a published category and not scheduled for later.
    Public,
    /// Everything the given user wrote, plus public posts.
    ViewerOrPublic(Uuid),
    /// No filtering at all.
    Unfiltered,
}

impl Visibility {
    /// Scope for a possibly anonymous viewer.
    pub fn for_viewer(viewer: Option<Uuid>) -> Self {
        match viewer {
            Some(user_id) => Self::ViewerOrPublic(user_id),
            None => Self::Public,
        }
    }

    pub fn admits(&self, post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
        match self {
            Self::Public => is_publicly_visible(post, category, now),
            Self::ViewerOrPublic(user_id) => is_visible(post, category, Some(*user_id), now),
            Self::Unfiltered => true,
        }
    }
}

/// `category` must be the post's own category. A post without one is never
/// public. `pub_date == now` counts as published.
pub fn is_publicly_visible(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    post.is_published
        && post.category_id.is_some()
        && category.is_some_and(|c| c.is_published)
        && post.pub_date <= now
}

/// Authors always see their own posts.
pub fn is_visible(
    post: &Post,
    category: Option<&Category>,
    viewer: Option<Uuid>,
    now: DateTime<Utc>,
) -> bool {
    viewer == Some(post.author_id) || is_publicly_visible(post, category, now)
}
