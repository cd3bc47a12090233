//! Service layer for the post store.
//! - `posts::repository` owns the in-memory sequence and id assignment.
//! - `posts::service` validates input and turns misses into `ServiceError`s.

pub mod errors;
pub mod posts;

pub use errors::ServiceError;
pub use posts::{InMemoryPostRepository, PostRepository, PostService};
