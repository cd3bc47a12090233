use std::sync::Arc;

use models::{Post, PostInput};
use tracing::debug;

use super::repository::{InMemoryPostRepository, PostRepository};
use crate::errors::ServiceError;

/// Post operations on top of a [`PostRepository`].
///
/// Cheap to clone; clones share the same repository.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Service over a fresh in-memory store holding the two seed posts.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPostRepository::seeded()))
    }

    pub async fn list(&self) -> Vec<Post> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Post, ServiceError> {
        self.repo.find(id).await.ok_or_else(|| ServiceError::not_found("post"))
    }

    pub async fn create(&self, input: PostInput) -> Result<Post, ServiceError> {
        let content = input.check()?.to_owned();
        let post = self.repo.insert(content).await;
        debug!(id = post.id, "post created");
        Ok(post)
    }

    pub async fn update(&self, id: i64, input: PostInput) -> Result<Post, ServiceError> {
        let content = input.check()?.to_owned();
        let post = self
            .repo
            .update_content(id, content)
            .await
            .ok_or_else(|| ServiceError::not_found("post"))?;
        debug!(id, "post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: i64) -> Result<Post, ServiceError> {
        let removed = self.repo.remove(id).await.ok_or_else(|| ServiceError::not_found("post"))?;
        debug!(id, "post deleted");
        Ok(removed)
    }
}

impl Default for PostService {
    fn default() -> Self { Self::in_memory() }
}
