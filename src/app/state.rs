//! Application state

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use image::DynamicImage;
use ratatui_image::protocol::StatefulProtocol;

use super::async_ops::AsyncCommand;
use crate::config::Config;
use crate::images::{self, ImageCache};
use crate::models::{Draft, ImageRef, Post, PostId};
use crate::store::{Action, PostStore};
use crate::theme::Theme;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// The feed
    #[default]
    List,
    /// Writing a new post
    Add,
    /// Editing an existing post
    Edit {
        /// Post being edited
        id: PostId,
    },
}

impl Screen {
    /// Whether a draft is being edited
    pub const fn is_compose(&self) -> bool {
        matches!(self, Self::Add | Self::Edit { .. })
    }
}

/// Overlay on top of the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No overlay
    #[default]
    Normal,
    /// Keyboard shortcuts
    Help,
    /// Theme selector
    ThemePicker,
    /// About dialog
    About,
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// The feed
    pub store: PostStore,
    /// Whether to quit
    pub should_quit: bool,
    /// Current theme
    pub theme: Theme,
    /// Current screen
    pub screen: Screen,
    /// Current overlay
    pub mode: Mode,

    /// Form state of the add/edit screen
    pub draft: Draft,

    /// Selected post index in the snapshot
    pub selected_post: usize,
    /// Scroll offset of the detail panel
    pub detail_scroll: u16,
    /// Highlighted row in the theme picker
    pub theme_picker_index: usize,

    /// Status message (bottom bar)
    pub status: String,

    /// Decoded images
    pub image_cache: ImageCache,
    /// Images being decoded
    pub loading_images: HashSet<String>,
    /// Images that failed to decode (not retried)
    pub failed_images: HashSet<String>,
    /// Render protocols for decoded images
    pub image_protocols: HashMap<String, StatefulProtocol>,

    next_ticket: u64,
    tick: u64,
}

impl AppState {
    /// Create a new app state around an existing store
    pub fn new(config: Config, store: PostStore) -> Self {
        let theme = config.theme;
        Self {
            config,
            store,
            should_quit: false,
            theme,
            screen: Screen::List,
            mode: Mode::Normal,
            draft: Draft::empty(),
            selected_post: 0,
            detail_scroll: 0,
            theme_picker_index: 0,
            status: String::new(),
            image_cache: ImageCache::new(),
            loading_images: HashSet::new(),
            failed_images: HashSet::new(),
            image_protocols: HashMap::new(),
            next_ticket: 0,
            tick: 0,
        }
    }

    /// Tick for animations
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Get current tick
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    // ==================== Selection ====================

    /// Get the currently selected post
    pub fn selected_post(&self) -> Option<&Post> {
        self.store.list().get(self.selected_post)
    }

    /// Move selection down
    pub fn select_next_post(&mut self) {
        if !self.store.is_empty() {
            self.selected_post = (self.selected_post + 1).min(self.store.len() - 1);
            self.detail_scroll = 0;
        }
    }

    /// Move selection up
    pub fn select_prev_post(&mut self) {
        self.selected_post = self.selected_post.saturating_sub(1);
        self.detail_scroll = 0;
    }

    /// Jump to the newest post
    pub fn select_first_post(&mut self) {
        self.selected_post = 0;
        self.detail_scroll = 0;
    }

    /// Jump to the oldest post
    pub fn select_last_post(&mut self) {
        self.selected_post = self.store.len().saturating_sub(1);
        self.detail_scroll = 0;
    }

    /// Select a post by id, if it is still in the feed
    pub fn select_post_id(&mut self, id: PostId) {
        if let Some(idx) = self.store.position(id) {
            self.selected_post = idx;
            self.detail_scroll = 0;
        }
    }

    /// Keep the selection inside the snapshot
    fn clamp_selection(&mut self) {
        self.selected_post = self.selected_post.min(self.store.len().saturating_sub(1));
    }

    // ==================== Screens ====================

    /// Open the add screen with a blank draft
    pub fn open_add(&mut self) {
        self.draft = Draft::empty();
        self.screen = Screen::Add;
    }

    /// Open the edit screen for the selected post
    pub fn open_edit(&mut self) {
        let Some(post) = self.selected_post() else {
            self.set_status("⚠ Nothing to edit");
            return;
        };
        let id = post.id;
        self.draft = Draft::from_post(post);
        self.screen = Screen::Edit { id };
    }

    /// Leave the add/edit screen without saving
    pub fn close_compose(&mut self) {
        self.draft = Draft::empty();
        self.screen = Screen::List;
    }

    // ==================== Store actions ====================

    /// Submit the draft as an add or update, then go back to the list
    pub fn submit_draft(&mut self) {
        if !self.draft.is_postable() {
            self.set_status("⚠ Write something first!");
            return;
        }
        if self.draft.is_importing() {
            self.set_status("⚠ Wait for the image to finish importing");
            return;
        }

        let text = self.draft.text.clone();
        let image = self.draft.image.clone();
        let action = match self.screen {
            Screen::Add => Action::Add { text, image },
            Screen::Edit { id } => Action::Update { id, text, image },
            Screen::List => return,
        };
        let editing = matches!(action, Action::Update { .. });

        let result = self.store.dispatch(action);
        self.close_compose();

        match result {
            Ok(id) => {
                self.select_post_id(id);
                self.set_status(if editing {
                    format!("✏️ Saved post {id}")
                } else {
                    format!("✅ Posted {id}")
                });
            }
            Err(e) => {
                self.clamp_selection();
                self.set_status(format!("❌ {e}"));
            }
        }
    }

    /// Delete the selected post
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_post().map(|p| p.id) else {
            self.set_status("⚠ Nothing to delete");
            return;
        };

        match self.store.dispatch(Action::Delete { id }) {
            Ok(_) => {
                self.clamp_selection();
                self.detail_scroll = 0;
                self.set_status(format!("🗑 Deleted post {id}"));
            }
            Err(e) => self.set_status(format!("❌ {e}")),
        }
    }

    // ==================== Image import ====================

    /// Start importing whatever is typed in the image input
    pub fn start_import(&mut self) -> Option<AsyncCommand> {
        if self.draft.is_importing() {
            self.set_status("⚠ An image is already importing");
            return None;
        }
        let Some(source) = ImageRef::parse(&self.draft.image_input) else {
            self.set_status("⚠ Enter an image path or URL");
            return None;
        };

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.draft.pending_import = Some(ticket);
        self.set_status("Importing image...");
        Some(AsyncCommand::ImportImage { ticket, source })
    }

    /// Apply the outcome of an import started with `ticket`
    pub fn finish_import(&mut self, ticket: u64, result: Result<ImageRef, String>) {
        if !self.screen.is_compose() || self.draft.pending_import != Some(ticket) {
            tracing::debug!("Dropping stale import result {ticket}");
            return;
        }

        match result {
            Ok(image) => {
                self.set_status(format!("🖼 Attached {}", image.label()));
                self.draft.attach_image(image);
            }
            Err(message) => {
                self.draft.pending_import = None;
                self.set_status(format!("❌ {message}"));
            }
        }
    }

    // ==================== Image preview ====================

    /// Image shown on the current screen
    fn visible_image(&self) -> Option<&ImageRef> {
        if self.screen.is_compose() {
            self.draft.image.as_ref()
        } else {
            self.selected_post().and_then(|p| p.image.as_ref())
        }
    }

    /// Local images that should be decoded for the current screen
    pub fn images_to_load(&self) -> Vec<(String, PathBuf)> {
        if !self.config.show_images {
            return Vec::new();
        }
        self.visible_image()
            .and_then(|image| {
                let path = image.local_path()?;
                let key = image.cache_key();
                let known = self.image_cache.contains(&key)
                    || self.loading_images.contains(&key)
                    || self.failed_images.contains(&key);
                (!known).then(|| (key, path.to_path_buf()))
            })
            .into_iter()
            .collect()
    }

    /// Remember which images are being decoded
    pub fn mark_images_loading(&mut self, images: &[(String, PathBuf)]) {
        for (key, _) in images {
            self.loading_images.insert(key.clone());
        }
    }

    /// Store a decoded image
    pub fn image_loaded(&mut self, key: &str, image: DynamicImage) {
        self.loading_images.remove(key);
        self.image_cache.insert(key, image);
        let cache = &self.image_cache;
        self.image_protocols.retain(|k, _| cache.contains(k));
    }

    /// Record a decode failure
    pub fn image_failed(&mut self, key: &str) {
        self.loading_images.remove(key);
        self.failed_images.insert(key.to_string());
    }

    /// Render protocol for a decoded image, built on first use
    pub fn get_image_protocol(&mut self, key: &str) -> Option<&mut StatefulProtocol> {
        if !self.image_protocols.contains_key(key) {
            let picker = images::picker()?;
            let image = self.image_cache.get(key)?;
            let protocol = picker.new_resize_protocol((*image).clone());
            self.image_protocols.insert(key.to_string(), protocol);
        }
        self.image_protocols.get_mut(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    fn state() -> AppState {
        AppState::new(Config::default(), demo::starter_store())
    }

    #[test]
    fn test_add_flow_selects_new_post() {
        let mut state = state();
        state.select_last_post();
        state.open_add();
        state.draft.text = "fresh".to_string();

        state.submit_draft();

        assert_eq!(state.screen, Screen::List);
        assert_eq!(state.store.len(), 3);
        assert_eq!(state.selected_post, 0);
        assert_eq!(state.selected_post().unwrap().text, "fresh");
        assert_eq!(state.selected_post().unwrap().id, PostId(3));
    }

    #[test]
    fn test_blank_draft_is_not_submitted() {
        let mut state = state();
        state.open_add();
        state.draft.text = "   ".to_string();

        state.submit_draft();

        assert_eq!(state.screen, Screen::Add);
        assert_eq!(state.store.len(), 2);
        assert!(state.status.contains("Write something"));
    }

    #[test]
    fn test_edit_flow_updates_in_place() {
        let mut state = state();
        state.select_last_post();
        state.open_edit();
        assert_eq!(state.screen, Screen::Edit { id: PostId(2) });

        state.draft.text = "corrected".to_string();
        state.submit_draft();

        assert_eq!(state.screen, Screen::List);
        assert_eq!(state.store.list()[1].text, "corrected");
        assert_eq!(state.selected_post, 1);
    }

    #[test]
    fn test_edit_of_vanished_post_reports_error() {
        let mut state = state();
        state.open_edit();
        state.store.delete(PostId(1)).unwrap();
        state.draft.text = "too late".to_string();

        state.submit_draft();

        assert_eq!(state.screen, Screen::List);
        assert!(state.status.contains("not found"));
        assert_eq!(state.store.len(), 1);
    }

    #[test]
    fn test_submit_waits_for_import() {
        let mut state = state();
        state.open_add();
        state.draft.text = "with picture".to_string();
        state.draft.image_input = "/tmp/cat.png".to_string();
        let cmd = state.start_import();
        assert!(matches!(cmd, Some(AsyncCommand::ImportImage { ticket: 1, .. })));

        state.submit_draft();
        assert_eq!(state.store.len(), 2);

        let imported = ImageRef::Local("/media/x-cat.png".into());
        state.finish_import(1, Ok(imported.clone()));
        state.submit_draft();

        assert_eq!(state.store.len(), 3);
        assert_eq!(state.store.list()[0].image, Some(imported));
    }

    #[test]
    fn test_stale_import_is_ignored() {
        let mut state = state();
        state.open_add();
        state.draft.image_input = "/tmp/a.png".to_string();
        state.start_import();
        state.close_compose();

        state.open_add();
        state.draft.image_input = "/tmp/b.png".to_string();
        state.start_import();

        state.finish_import(1, Ok(ImageRef::Local("/media/a.png".into())));
        assert!(state.draft.image.is_none());
        assert_eq!(state.draft.pending_import, Some(2));

        state.finish_import(2, Err("image not found: /tmp/b.png".to_string()));
        assert!(!state.draft.is_importing());
        assert!(state.status.starts_with("❌"));
    }

    #[test]
    fn test_delete_keeps_selection_in_bounds() {
        let mut state = state();
        state.select_last_post();

        state.delete_selected();
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.selected_post, 0);

        state.delete_selected();
        assert!(state.store.is_empty());

        state.delete_selected();
        assert!(state.status.contains("Nothing to delete"));
    }

    #[test]
    fn test_images_to_load_skips_remote_and_known() {
        let mut state = state();
        state.store.add("remote", Some(ImageRef::Remote("https://x.test/a.png".into())));
        assert!(state.images_to_load().is_empty());

        state.store.add("local", Some(ImageRef::Local("/tmp/a.png".into())));
        let pending = state.images_to_load();
        assert_eq!(pending.len(), 1);

        state.mark_images_loading(&pending);
        assert!(state.images_to_load().is_empty());

        state.image_failed(&pending[0].0);
        assert!(state.images_to_load().is_empty());
    }
}
