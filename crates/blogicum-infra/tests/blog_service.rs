//! Blog use-cases running against the in-memory repositories.

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use blogicum_core::domain::{CategoryDraft, Category, Post, PostDraft, ProfileChanges, User};
use blogicum_core::error::DomainError;
use blogicum_core::policy::{Outcome, Redirect};
use blogicum_core::ports::BaseRepository;
use blogicum_core::service::BlogService;
use blogicum_infra::InMemoryStore;

struct Blog {
    service: BlogService,
    author: User,
    reader: User,
    category: Category,
}

impl Blog {
    async fn new() -> Self {
        let store = InMemoryStore::new();
        let service = BlogService::new(store.repositories(), 10);

        let author = service
            .register(User::new("author".into(), "author@example.com".into(), "hash".into()))
            .await
            .unwrap();
        let reader = service
            .register(User::new("reader".into(), "reader@example.com".into(), "hash".into()))
            .await
            .unwrap();
        let category = service
            .create_category(CategoryDraft {
                title: "Travel".into(),
                description: "Trips".into(),
                slug: "travel".into(),
                is_published: true,
            })
            .await
            .unwrap();

        Self {
            service,
            author,
            reader,
            category,
        }
    }

    fn draft(&self, offset: TimeDelta) -> PostDraft {
        PostDraft {
            title: "Lake Baikal".into(),
            text: "Clear ice in March".into(),
            pub_date: Utc::now() + offset,
            image: None,
            location_id: None,
            category_id: Some(self.category.id),
            is_published: true,
        }
    }

    async fn publish(&self, draft: PostDraft) -> Post {
        self.service.create_post(self.author.id, draft).await.unwrap()
    }
}

fn is_not_found<T>(result: &Result<T, DomainError>) -> bool {
    matches!(result, Err(DomainError::NotFound { .. }))
}

#[tokio::test]
async fn unpublished_post_is_hidden_from_non_authors() {
    let blog = Blog::new().await;
    let mut draft = blog.draft(-TimeDelta::hours(1));
    draft.is_published = false;
    let post = blog.publish(draft).await;

    assert!(is_not_found(&blog.service.post_detail(None, post.id).await));
    assert!(is_not_found(
        &blog.service.post_detail(Some(blog.reader.id), post.id).await
    ));
    assert!(blog.service.post_detail(Some(blog.author.id), post.id).await.is_ok());
    assert_eq!(blog.service.index(None).await.unwrap().total, 0);
}

#[tokio::test]
async fn scheduled_post_is_visible_only_to_its_author() {
    let blog = Blog::new().await;
    let post = blog.publish(blog.draft(TimeDelta::days(1))).await;

    assert!(is_not_found(
        &blog.service.post_detail(Some(blog.reader.id), post.id).await
    ));
    let detail = blog
        .service
        .post_detail(Some(blog.author.id), post.id)
        .await
        .unwrap();
    assert_eq!(detail.post.post.id, post.id);
}

#[tokio::test]
async fn non_author_edit_is_redirected_and_post_unchanged() {
    let blog = Blog::new().await;
    let post = blog.publish(blog.draft(-TimeDelta::hours(1))).await;

    let mut hijack = blog.draft(-TimeDelta::hours(1));
    hijack.title = "Hijacked".into();
    let outcome = blog
        .service
        .edit_post(blog.reader.id, post.id, hijack)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Redirected(Redirect::PostDetail { post_id: post.id })
    );
    let stored = blog
        .service
        .repositories()
        .posts
        .find_by_id(post.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, post);
}

#[tokio::test]
async fn non_author_delete_is_redirected() {
    let blog = Blog::new().await;
    let post = blog.publish(blog.draft(-TimeDelta::hours(1))).await;

    let outcome = blog.service.delete_post(blog.reader.id, post.id).await.unwrap();

    assert!(!outcome.is_applied());
    assert!(blog.service.post_detail(None, post.id).await.is_ok());
}

#[tokio::test]
async fn author_edit_is_applied() {
    let blog = Blog::new().await;
    let post = blog.publish(blog.draft(-TimeDelta::hours(1))).await;

    let mut changes = blog.draft(-TimeDelta::hours(1));
    changes.title = "Lake Baikal, revisited".into();
    let outcome = blog
        .service
        .edit_post(blog.author.id, post.id, changes)
        .await
        .unwrap();

    match outcome {
        Outcome::Applied(updated) => {
            assert_eq!(updated.title, "Lake Baikal, revisited");
            assert_eq!(updated.author_id, blog.author.id);
        }
        Outcome::Redirected(_) => panic!("author edit must be applied"),
    }
}

#[tokio::test]
async fn deleting_post_removes_its_comments() {
    let blog = Blog::new().await;
    let post = blog.publish(blog.draft(-TimeDelta::hours(1))).await;
    let comment = blog
        .service
        .add_comment(blog.reader.id, post.id, "Beautiful".into())
        .await
        .unwrap();

    let outcome = blog.service.delete_post(blog.author.id, post.id).await.unwrap();

    assert!(outcome.is_applied());
    let comments = &blog.service.repositories().comments;
    assert!(comments.find_by_id(comment.id).await.unwrap().is_none());
    assert!(is_not_found(&blog.service.post_detail(Some(blog.author.id), post.id).await));
}

#[tokio::test]
async fn comments_are_listed_oldest_first_and_counted() {
    let blog = Blog::new().await;
    let post = blog.publish(blog.draft(-TimeDelta::hours(1))).await;
    for text in ["first", "second"] {
        blog.service
            .add_comment(blog.reader.id, post.id, text.into())
            .await
            .unwrap();
    }

    let detail = blog.service.post_detail(None, post.id).await.unwrap();
    let texts: Vec<&str> = detail.comments.iter().map(|c| c.comment.text.as_str()).collect();

    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(detail.comments[0].author_username, "reader");
    assert_eq!(detail.post.comment_count, 2);
}

#[tokio::test]
async fn cannot_comment_on_hidden_post() {
    let blog = Blog::new().await;
    let post = blog.publish(blog.draft(TimeDelta::days(2))).await;

    let result = blog
        .service
        .add_comment(blog.reader.id, post.id, "Early bird".into())
        .await;

    assert!(is_not_found(&result));
}

#[tokio::test]
async fn comment_mutations_require_comment_author() {
    let blog = Blog::new().await;
    let post = blog.publish(blog.draft(-TimeDelta::hours(1))).await;
    let comment = blog
        .service
        .add_comment(blog.reader.id, post.id, "Nice".into())
        .await
        .unwrap();

    let by_post_author = blog
        .service
        .edit_comment(blog.author.id, post.id, comment.id, "Edited".into())
        .await
        .unwrap();
    assert_eq!(
        by_post_author,
        Outcome::Redirected(Redirect::PostDetail { post_id: post.id })
    );

    let wrong_post = blog
        .service
        .delete_comment(blog.reader.id, Uuid::new_v4(), comment.id)
        .await;
    assert!(is_not_found(&wrong_post));

    let edited = blog
        .service
        .edit_comment(blog.reader.id, post.id, comment.id, "Very nice".into())
        .await
        .unwrap();
    assert!(matches!(edited, Outcome::Applied(c) if c.text == "Very nice"));

    let deleted = blog
        .service
        .delete_comment(blog.reader.id, post.id, comment.id)
        .await
        .unwrap();
    assert!(deleted.is_applied());
}

#[tokio::test]
async fn unpublished_category_feed_is_not_found() {
    let blog = Blog::new().await;
    blog.service
        .create_category(CategoryDraft {
            title: "Drafts".into(),
            description: String::new(),
            slug: "drafts".into(),
            is_published: false,
        })
        .await
        .unwrap();

    assert!(is_not_found(&blog.service.category_posts("drafts", None).await));
    assert!(is_not_found(&blog.service.category_posts("missing", None).await));

    blog.publish(blog.draft(-TimeDelta::hours(1))).await;
    let (category, posts) = blog.service.category_posts("travel", None).await.unwrap();
    assert_eq!(category.id, blog.category.id);
    assert_eq!(posts.total, 1);
}

#[tokio::test]
async fn profile_owner_sees_drafts() {
    let blog = Blog::new().await;
    blog.publish(blog.draft(-TimeDelta::hours(1))).await;
    let mut hidden = blog.draft(-TimeDelta::hours(2));
    hidden.is_published = false;
    blog.publish(hidden).await;

    let own = blog
        .service
        .profile(Some(blog.author.id), "author", None)
        .await
        .unwrap();
    let public = blog
        .service
        .profile(Some(blog.reader.id), "author", None)
        .await
        .unwrap();

    assert_eq!(own.posts.total, 2);
    assert_eq!(public.posts.total, 1);
    assert!(is_not_found(&blog.service.profile(None, "nobody", None).await));
}

#[tokio::test]
async fn post_with_unknown_category_is_rejected() {
    let blog = Blog::new().await;
    let mut draft = blog.draft(-TimeDelta::hours(1));
    draft.category_id = Some(Uuid::new_v4());

    let result = blog.service.create_post(blog.author.id, draft).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn profile_edit_keeps_usernames_unique() {
    let blog = Blog::new().await;

    let clash = blog
        .service
        .edit_profile(
            blog.reader.id,
            ProfileChanges {
                username: "author".into(),
                email: "reader@example.com".into(),
                first_name: String::new(),
                last_name: String::new(),
            },
        )
        .await;
    assert!(matches!(clash, Err(DomainError::Duplicate(_))));

    let renamed = blog
        .service
        .edit_profile(
            blog.reader.id,
            ProfileChanges {
                username: "reader2".into(),
                email: "reader@example.com".into(),
                first_name: "Ivan".into(),
                last_name: "Petrov".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.username, "reader2");
    assert_eq!(renamed.first_name, "Ivan");
}

#[tokio::test]
async fn duplicate_category_slug_is_rejected() {
    let blog = Blog::new().await;

    let result = blog
        .service
        .create_category(CategoryDraft {
            title: "Travel again".into(),
            description: String::new(),
            slug: "travel".into(),
            is_published: true,
        })
        .await;

    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn created_locations_are_listed_only_when_published() {
    let blog = Blog::new().await;

    let lake = blog
        .service
        .create_location("Lake Baikal".into(), true)
        .await
        .unwrap();
    blog.service
        .create_location("Secret cove".into(), false)
        .await
        .unwrap();

    let published = blog.service.published_locations().await.unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, lake.id);

    let blank = blog.service.create_location("  ".into(), true).await;
    assert!(matches!(blank, Err(DomainError::Validation(_))));
}
