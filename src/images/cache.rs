//! LRU cache for decoded images.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use image::DynamicImage;

/// Maximum number of images to keep in cache
const MAX_CACHE_SIZE: usize = 50;

/// Cache entry for an image
#[derive(Clone)]
struct CachedImage {
    image: Arc<DynamicImage>,
    last_access: Instant,
}

/// Decoded images keyed by [`ImageRef::cache_key`](crate::models::ImageRef::cache_key)
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, CachedImage>,
}

impl ImageCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decoded image, evicting the least recently used one when full.
    pub fn insert(&mut self, key: &str, image: DynamicImage) {
        if self.images.len() >= MAX_CACHE_SIZE && !self.images.contains_key(key) {
            self.evict_oldest();
        }

        self.images.insert(
            key.to_string(),
            CachedImage {
                image: Arc::new(image),
                last_access: Instant::now(),
            },
        );
    }

    /// Get a decoded image, marking it as recently used.
    pub fn get(&mut self, key: &str) -> Option<Arc<DynamicImage>> {
        let entry = self.images.get_mut(key)?;
        entry.last_access = Instant::now();
        Some(Arc::clone(&entry.image))
    }

    /// Check if an image is cached.
    pub fn contains(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self
            .images
            .iter()
            .min_by_key(|(_, v)| v.last_access)
            .map(|(k, _)| k.clone())
        {
            tracing::debug!("Evicting cached image {oldest}");
            self.images.remove(&oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tiny() -> DynamicImage {
        DynamicImage::new_rgb8(1, 1)
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = ImageCache::new();
        assert!(cache.is_empty());

        cache.insert("a", tiny());

        assert!(cache.contains("a"));
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_full_cache_evicts_least_recent() {
        let mut cache = ImageCache::new();
        for i in 0..MAX_CACHE_SIZE {
            cache.insert(&i.to_string(), tiny());
            std::thread::sleep(Duration::from_millis(1));
        }
        // Touch "0" so "1" becomes the oldest
        cache.get("0");

        cache.insert("new", tiny());

        assert_eq!(cache.len(), MAX_CACHE_SIZE);
        assert!(cache.contains("0"));
        assert!(!cache.contains("1"));
        assert!(cache.contains("new"));
    }
}
