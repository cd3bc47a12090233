use async_trait::async_trait;
use models::Post;
use tokio::sync::RwLock;

/// Storage seam for posts. Implementations keep insertion order and assign ids.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self) -> Vec<Post>;
    async fn find(&self, id: i64) -> Option<Post>;
    /// Append a new post with the next id and the current timestamp.
    async fn insert(&self, content: String) -> Post;
    /// Replace `content` in place; id and creation time are left alone.
    async fn update_content(&self, id: i64, content: String) -> Option<Post>;
    async fn remove(&self, id: i64) -> Option<Post>;
}

struct PostTable {
    posts: Vec<Post>,
    /// Never decreases, so ids of deleted posts are not handed out again.
    next_id: i64,
}

impl PostTable {
    fn position(&self, id: i64) -> Option<usize> {
        self.posts.iter().position(|p| p.id == id)
    }
}

/// Process-local post store guarded by a single lock.
pub struct InMemoryPostRepository {
    inner: RwLock<PostTable>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    /// Start from existing posts; the counter resumes after the highest id.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().map_or(1, |max| max + 1);
        Self { inner: RwLock::new(PostTable { posts, next_id }) }
    }

    /// The two posts the service starts with.
    pub fn seeded() -> Self {
        Self::with_posts(vec![
            Post::new(1, "My first post"),
            Post::new(2, "My second post"),
        ])
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Vec<Post> {
        self.inner.read().await.posts.clone()
    }

    async fn find(&self, id: i64) -> Option<Post> {
        let table = self.inner.read().await;
        table.posts.iter().find(|p| p.id == id).cloned()
    }

    async fn insert(&self, content: String) -> Post {
        let mut table = self.inner.write().await;
        let post = Post::new(table.next_id, content);
        table.next_id += 1;
        table.posts.push(post.clone());
        post
    }

    async fn update_content(&self, id: i64, content: String) -> Option<Post> {
        let mut table = self.inner.write().await;
        let post = table.posts.iter_mut().find(|p| p.id == id)?;
        post.content = content;
        Some(post.clone())
    }

    async fn remove(&self, id: i64) -> Option<Post> {
        let mut table = self.inner.write().await;
        let idx = table.position(id)?;
        // `remove`, not `swap_remove`: the rest keep their relative order
        Some(table.posts.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(posts: &[Post]) -> Vec<i64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn seeded_store_has_two_posts_in_order() {
        let repo = InMemoryPostRepository::seeded();
        let posts = repo.list().await;
        assert_eq!(ids(&posts), vec![1, 2]);
        assert_eq!(posts[0].content, "My first post");
        assert_eq!(posts[1].content, "My second post");
    }

    #[tokio::test]
    async fn insert_appends_with_next_id() {
        let repo = InMemoryPostRepository::seeded();
        let post = repo.insert("third post".into()).await;
        assert_eq!(post.id, 3);
        assert_eq!(ids(&repo.list().await), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryPostRepository::seeded();
        let third = repo.insert("third post".into()).await;
        repo.remove(third.id).await.expect("removed");
        let fourth = repo.insert("fourth post".into()).await;
        assert_eq!(fourth.id, 4);
    }

    #[tokio::test]
    async fn insert_works_after_store_is_emptied() {
        let repo = InMemoryPostRepository::seeded();
        repo.remove(1).await.expect("removed 1");
        repo.remove(2).await.expect("removed 2");
        assert!(repo.list().await.is_empty());
        let post = repo.insert("fresh start".into()).await;
        assert_eq!(post.id, 3);
    }

    #[tokio::test]
    async fn empty_store_starts_at_one() {
        let repo = InMemoryPostRepository::new();
        assert_eq!(repo.insert("first!".into()).await.id, 1);
    }

    #[tokio::test]
    async fn with_posts_resumes_after_highest_id() {
        let repo = InMemoryPostRepository::with_posts(vec![
            Post::new(10, "ten ten"),
            Post::new(4, "four four"),
        ]);
        assert_eq!(repo.insert("next one".into()).await.id, 11);
        assert_eq!(ids(&repo.list().await), vec![10, 4, 11]);
    }

    #[tokio::test]
    async fn update_content_keeps_id_and_timestamp() {
        let repo = InMemoryPostRepository::seeded();
        let before = repo.find(2).await.expect("seeded");
        let after = repo.update_content(2, "edited content".into()).await.expect("updated");
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.content, "edited content");
        assert_eq!(repo.find(2).await, Some(after));
        assert!(repo.update_content(42, "nobody home".into()).await.is_none());
    }

    #[tokio::test]
    async fn remove_keeps_relative_order() {
        let repo = InMemoryPostRepository::seeded();
        repo.insert("third post".into()).await;
        repo.insert("fourth post".into()).await;
        let removed = repo.remove(2).await.expect("removed");
        assert_eq!(removed.id, 2);
        assert_eq!(ids(&repo.list().await), vec![1, 3, 4]);
        assert!(repo.remove(2).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_get_unique_ids() {
        let repo = std::sync::Arc::new(InMemoryPostRepository::seeded());
        let mut handles = Vec::new();
        for i in 0..50 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.insert(format!("post #{i}")).await.id }));
        }
        let mut got = Vec::new();
        for h in handles {
            got.push(h.await.unwrap());
        }
        got.sort_unstable();
        assert_eq!(got, (3..53).collect::<Vec<_>>());
        assert_eq!(repo.list().await.len(), 52);
    }
}
