//! Starter content shown on first launch

use crate::models::{Post, PostId};
use crate::store::PostStore;

/// Posts the feed opens with, newest first
pub fn starter_posts() -> Vec<Post> {
    vec![
        Post::new(
            PostId(1),
            "Le nouveau dirigeant syrien Ahmad al-Chareh a déclaré dimanche que toutes les armes du pays seront placées sous le contrôle de l'État syrien.",
            None,
        ),
        Post::new(
            PostId(2),
            "France : Bayrou opère les \"derniers réglages\" de la composition de son gouvernement",
            None,
        ),
    ]
}

/// Store pre-filled with the starter posts
pub fn starter_store() -> PostStore {
    PostStore::with_posts(starter_posts())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_store_continues_ids() {
        let mut store = starter_store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.add("new", None), PostId(3));
        assert_eq!(store.list()[0].text, "new");
    }
}
