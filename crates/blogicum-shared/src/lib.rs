//! # Blogicum Shared
//!
//! Request and response types of the HTTP API, shared by the server and
//! any Rust client.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse, PageResponse};
