//! Decoding local image files off the UI thread.

use std::path::{Path, PathBuf};

use image::DynamicImage;

/// Longest edge kept after decoding
const MAX_DIMENSION: u32 = 800;

/// Decode a local image on tokio's blocking pool.
pub async fn decode_local(path: PathBuf) -> Result<DynamicImage, String> {
    tokio::task::spawn_blocking(move || decode_file(&path))
        .await
        .map_err(|e| format!("decoder task failed: {e}"))?
}

/// Decode a local image synchronously.
pub fn decode_file(path: &Path) -> Result<DynamicImage, String> {
    tracing::debug!("Decoding image: {}", path.display());
    let image = image::open(path).map_err(|e| e.to_string())?;
    Ok(resize_if_needed(image))
}

/// Resize image if it's too large (to save memory and rendering time).
fn resize_if_needed(image: DynamicImage) -> DynamicImage {
    let (width, height) = (image.width(), image.height());

    if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
        return image;
    }

    // Calculate new dimensions maintaining aspect ratio
    let ratio = f64::from(width) / f64::from(height);
    let (new_width, new_height) = if width > height {
        (MAX_DIMENSION, (f64::from(MAX_DIMENSION) / ratio) as u32)
    } else {
        ((f64::from(MAX_DIMENSION) * ratio) as u32, MAX_DIMENSION)
    };

    image.resize(new_width, new_height, image::imageops::FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_large_image_is_downsized() {
        let image = DynamicImage::new_rgb8(1600, 400);
        let resized = resize_if_needed(image);
        assert_eq!(resized.width(), MAX_DIMENSION);
        assert_eq!(resized.height(), 200);
    }

    #[test]
    fn test_small_image_is_untouched() {
        let resized = resize_if_needed(DynamicImage::new_rgb8(10, 20));
        assert_eq!((resized.width(), resized.height()), (10, 20));
    }

    #[test]
    fn test_decode_real_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dot.png");
        DynamicImage::new_rgb8(3, 2).save(&path).unwrap();

        let image = tokio_test::block_on(decode_local(path)).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"definitely not png").unwrap();

        assert!(decode_file(&path).is_err());
    }
}
