//! # Blogicum Core
//!
//! The domain layer of the blog: entities, the visibility and ownership
//! policies, repository ports and the use-cases built on them.
//! No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::BlogService;
