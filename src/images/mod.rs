//! Decoding and caching post images for terminal display.
//!
//! Images render through the best graphics protocol the terminal offers
//! (Sixel, Kitty, iTerm2) with a fallback to Unicode halfblocks.

mod cache;
pub mod loader;

pub use cache::ImageCache;

use ratatui_image::picker::Picker;
use std::sync::OnceLock;

/// Global picker instance (initialized once at startup)
static PICKER: OnceLock<Picker> = OnceLock::new();

/// Query terminal graphics support.
///
/// Call once at startup, before entering the alternate screen.
pub fn init_picker() {
    PICKER.get_or_init(|| match Picker::from_query_stdio() {
        Ok(p) => {
            tracing::info!("Image support detected: {:?}", p.protocol_type());
            p
        }
        Err(e) => {
            tracing::debug!("No image protocol support: {e}");
            Picker::halfblocks()
        }
    });
}

/// Get the global picker instance.
pub fn picker() -> Option<&'static Picker> {
    PICKER.get()
}
