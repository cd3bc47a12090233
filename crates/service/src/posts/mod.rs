pub mod repository;
pub mod service;

pub use repository::{InMemoryPostRepository, PostRepository};
pub use service::PostService;
