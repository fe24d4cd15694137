//! In-memory post store
//!
//! The store is the single source of truth for the feed. It keeps posts
//! newest-first and hands out ids from its own monotonic counter, so ids
//! never repeat even after deletions.

use thiserror::Error;

use crate::models::{ImageRef, Post, PostId};

/// Errors returned by store mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No post carries the given id
    #[error("post {0} not found")]
    NotFound(PostId),
}

/// A mutation requested by a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a post at the head of the feed
    Add {
        text: String,
        image: Option<ImageRef>,
    },
    /// Replace the text and image of a post
    Update {
        id: PostId,
        text: String,
        image: Option<ImageRef>,
    },
    /// Remove a post
    Delete { id: PostId },
}

impl Action {
    /// Short verb for log lines
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Ordered, in-memory collection of posts
#[derive(Debug, Clone)]
pub struct PostStore {
    posts: Vec<Post>,
    next_id: PostId,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            posts: Vec::new(),
            next_id: PostId(1),
        }
    }

    /// Create a store holding `posts` in the given order.
    ///
    /// The id counter starts after the highest id present.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let next_id = posts
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(PostId(1), PostId::next);
        Self { posts, next_id }
    }

    /// Current snapshot, newest first
    pub fn list(&self) -> &[Post] {
        &self.posts
    }

    /// Number of posts
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the feed is empty
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Look up a post by id
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Index of a post in the snapshot
    pub fn position(&self, id: PostId) -> Option<usize> {
        self.posts.iter().position(|p| p.id == id)
    }

    /// Add a post at the head of the feed and return its id
    pub fn add(&mut self, text: impl Into<String>, image: Option<ImageRef>) -> PostId {
        let id = self.next_id;
        self.next_id = id.next();
        self.posts.insert(0, Post::new(id, text, image));
        id
    }

    /// Replace the text and image of an existing post in place
    pub fn update(
        &mut self,
        id: PostId,
        text: impl Into<String>,
        image: Option<ImageRef>,
    ) -> Result<(), StoreError> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        post.text = text.into();
        post.image = image;
        Ok(())
    }

    /// Remove a post and return it
    pub fn delete(&mut self, id: PostId) -> Result<Post, StoreError> {
        let idx = self.position(id).ok_or(StoreError::NotFound(id))?;
        Ok(self.posts.remove(idx))
    }

    /// Apply an action, returning the id of the post it touched
    pub fn dispatch(&mut self, action: Action) -> Result<PostId, StoreError> {
        let name = action.name();
        let result = match action {
            Action::Add { text, image } => Ok(self.add(text, image)),
            Action::Update { id, text, image } => self.update(id, text, image).map(|()| id),
            Action::Delete { id } => self.delete(id).map(|post| post.id),
        };

        match &result {
            Ok(id) => tracing::debug!("{name} {id} applied, {} posts", self.posts.len()),
            Err(e) => tracing::warn!("{name} rejected: {e}"),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> PostStore {
        PostStore::with_posts(vec![
            Post::new(PostId(1), "first", None),
            Post::new(PostId(2), "second", None),
        ])
    }

    fn ids(store: &PostStore) -> Vec<u64> {
        store.list().iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_add_on_empty_store() {
        let mut store = PostStore::new();
        let id = store.add("hello", None);

        assert_eq!(id, PostId(1));
        assert_eq!(store.len(), 1);
        let post = &store.list()[0];
        assert_eq!(post.id, PostId(1));
        assert_eq!(post.text, "hello");
        assert_eq!(post.image, None);
    }

    #[test]
    fn test_add_puts_newest_first() {
        let mut store = PostStore::new();
        store.add("a", None);
        store.add("b", None);
        store.add("c", None);

        let texts: Vec<_> = store.list().iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["c", "b", "a"]);
    }

    #[test]
    fn test_add_to_seeded_store() {
        let mut store = seeded();
        let id = store.add("new", None);

        assert_eq!(id, PostId(3));
        assert_eq!(ids(&store), [3, 1, 2]);
        assert_eq!(store.list()[0].text, "new");
        assert_eq!(store.list()[0].image, None);
    }

    #[test]
    fn test_ids_never_repeat_after_delete() {
        let mut store = PostStore::new();
        let a = store.add("a", None);
        let b = store.add("b", None);
        store.delete(a).unwrap();
        let c = store.add("c", None);

        assert_ne!(c, b);
        assert_eq!(c, PostId(3));
        assert_eq!(ids(&store), [3, 2]);
    }

    #[test]
    fn test_update_replaces_text_and_image_only() {
        let mut store = seeded();
        let before = store.clone();
        let image = ImageRef::Remote("https://example.com/x.png".to_string());

        store.update(PostId(2), "edited", Some(image.clone())).unwrap();

        assert_eq!(ids(&store), [1, 2]);
        assert_eq!(store.list()[0], before.list()[0]);
        let post = store.get(PostId(2)).unwrap();
        assert_eq!(post.text, "edited");
        assert_eq!(post.image, Some(image));
        assert_eq!(post.created_at, before.list()[1].created_at);
    }

    #[test]
    fn test_update_missing_id_is_reported_and_harmless() {
        let mut store = seeded();
        let before = store.list().to_vec();

        let result = store.update(PostId(42), "nope", None);

        assert_eq!(result, Err(StoreError::NotFound(PostId(42))));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = PostStore::new();
        for text in ["a", "b", "c", "d"] {
            store.add(text, None);
        }

        let removed = store.delete(PostId(3)).unwrap();

        assert_eq!(removed.text, "c");
        assert_eq!(store.len(), 3);
        assert_eq!(ids(&store), [4, 2, 1]);
    }

    #[test]
    fn test_delete_missing_id_is_reported_and_harmless() {
        let mut store = seeded();
        let before = store.list().to_vec();

        assert_eq!(store.delete(PostId(9)), Err(StoreError::NotFound(PostId(9))));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_length_tracks_adds_minus_deletes() {
        let mut store = PostStore::new();
        let mut live = Vec::new();
        let mut deletes = 0;

        for i in 0..20u64 {
            let id = store.add(format!("post {i}"), None);
            live.insert(0, id);
            if i % 3 == 2 {
                let victim = live.remove(1);
                store.delete(victim).unwrap();
                deletes += 1;
            }
        }
        // A failed delete doesn't count
        assert!(store.delete(PostId(1000)).is_err());

        assert_eq!(store.len(), 20 - deletes);
        let got: Vec<_> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(got, live);
    }

    #[test]
    fn test_dispatch_routes_actions() {
        let mut store = seeded();

        let id = store
            .dispatch(Action::Add {
                text: "via dispatch".to_string(),
                image: None,
            })
            .unwrap();
        assert_eq!(id, PostId(3));

        store
            .dispatch(Action::Update {
                id,
                text: "changed".to_string(),
                image: None,
            })
            .unwrap();
        assert_eq!(store.get(id).unwrap().text, "changed");

        assert_eq!(store.dispatch(Action::Delete { id }), Ok(id));
        assert!(store.get(id).is_none());
        assert_eq!(
            store.dispatch(Action::Delete { id }),
            Err(StoreError::NotFound(id))
        );
    }

    #[test]
    fn test_with_posts_counter_follows_max_id() {
        let mut store = PostStore::with_posts(vec![
            Post::new(PostId(7), "x", None),
            Post::new(PostId(3), "y", None),
        ]);
        assert_eq!(store.add("z", None), PostId(8));
    }
}
