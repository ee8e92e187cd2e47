//! Visibility and ownership decisions.
//!
//! Both policies are pure functions of the records involved, the viewer and
//! the current time. Repositories and use-cases call into them; nothing here
//! touches storage.

mod ownership;
mod visibility;

pub use ownership::{Authored, Outcome, Redirect, authorize};
pub use visibility::{Visibility, is_publicly_visible, is_visible};
