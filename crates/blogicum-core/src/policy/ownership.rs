use uuid::Uuid;

use crate::domain::{Comment, Post};

/// A record that belongs to one user and is displayed on a post's page.
pub trait Authored {
    fn author_id(&self) -> Uuid;

    /// Post whose detail view shows this record.
    fn detail_post_id(&self) -> Uuid;
}

impl Authored for Post {
    fn author_id(&self) -> Uuid {
        self.author_id
    }

    fn detail_post_id(&self) -> Uuid {
        self.id
    }
}

impl Authored for Comment {
    fn author_id(&self) -> Uuid {
        self.author_id
    }

    fn detail_post_id(&self) -> Uuid {
        self.post_id
    }
}

/// Where a refused mutation sends the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    PostDetail { post_id: Uuid },
}

/// Result of an edit or delete that may be refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    Redirected(Redirect),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Only the author may mutate a record. Anyone else is sent back to the
/// post's detail view.
pub fn authorize<R: Authored>(requester: Uuid, resource: &R) -> Result<(), Redirect> {
    if requester == resource.author_id() {
        Ok(())
    } else {
        Err(Redirect::PostDetail {
            post_id: resource.detail_post_id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::PostDraft;

    fn post(author: Uuid) -> Post {
        Post::new(
            author,
            PostDraft {
                title: "Title".to_string(),
                text: "Text".to_string(),
                pub_date: Utc::now(),
                image: None,
                location_id: None,
                category_id: None,
                is_published: true,
            },
        )
    }

    #[test]
    fn test_author_is_authorized() {
        let author = Uuid::new_v4();
        assert_eq!(authorize(author, &post(author)), Ok(()));
    }

    #[test]
    fn test_stranger_is_redirected_to_post() {
        let p = post(Uuid::new_v4());
        assert_eq!(
            authorize(Uuid::new_v4(), &p),
            Err(Redirect::PostDetail { post_id: p.id })
        );
    }

    #[test]
    fn test_comment_redirect_targets_parent_post() {
        let p = post(Uuid::new_v4());
        let comment = Comment::new(p.id, Uuid::new_v4(), "Nice".to_string()).unwrap();

        assert_eq!(
            authorize(p.author_id, &comment),
            Err(Redirect::PostDetail { post_id: p.id })
        );
        assert!(authorize(comment.author_id, &comment).is_ok());
    }
}
