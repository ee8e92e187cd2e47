//! Domain entities - the core business objects.

mod category;
mod comment;
mod location;
mod page;
mod post;
mod user;

pub mod validation;

pub use category::{Category, CategoryDraft};
pub use comment::{Comment, CommentView};
pub use location::Location;
pub use page::{Page, PageRequest};
pub use post::{Post, PostDraft, PostSummary};
pub use user::{ProfileChanges, ROLE_STAFF, ROLE_USER, User};
