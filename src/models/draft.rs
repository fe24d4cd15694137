//! Editable form state shared by the add and edit screens

use super::{ImageRef, Post};

/// Which input of the draft has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    /// Post text editor
    #[default]
    Text,
    /// Image path / URL input
    Image,
}

/// A post being written or edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Text being written
    pub text: String,
    /// Image currently attached (already imported)
    pub image: Option<ImageRef>,
    /// Raw contents of the image input line
    pub image_input: String,
    /// Focused input
    pub focus: DraftField,
    /// Ticket of the image import in flight, if any
    pub pending_import: Option<u64>,
}

impl Draft {
    /// Blank draft for a new post
    pub fn empty() -> Self {
        Self::default()
    }

    /// Draft pre-filled from an existing post
    pub fn from_post(post: &Post) -> Self {
        Self {
            text: post.text.clone(),
            image: post.image.clone(),
            ..Self::default()
        }
    }

    /// Text has something other than whitespace
    pub fn is_postable(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Number of characters in the text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Switch focus between the text editor and the image input
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DraftField::Text => DraftField::Image,
            DraftField::Image => DraftField::Text,
        };
    }

    /// Type a character into the focused input
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            DraftField::Text => self.text.push(c),
            DraftField::Image => self.image_input.push(c),
        }
    }

    /// Delete the last character of the focused input
    pub fn backspace(&mut self) {
        match self.focus {
            DraftField::Text => {
                self.text.pop();
            }
            DraftField::Image => {
                self.image_input.pop();
            }
        }
    }

    /// Attach an imported image and reset the image input
    pub fn attach_image(&mut self, image: ImageRef) {
        self.image = Some(image);
        self.image_input.clear();
        self.pending_import = None;
        self.focus = DraftField::Text;
    }

    /// Whether an image import is still running
    pub const fn is_importing(&self) -> bool {
        self.pending_import.is_some()
    }

    /// Drop the attached image
    pub fn remove_image(&mut self) {
        self.image = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostId;

    #[test]
    fn test_postable_requires_non_blank_text() {
        let mut draft = Draft::empty();
        assert!(!draft.is_postable());

        draft.text = "  \n\t".to_string();
        assert!(!draft.is_postable());

        draft.text.push('x');
        assert!(draft.is_postable());
    }

    #[test]
    fn test_typing_follows_focus() {
        let mut draft = Draft::empty();
        draft.push_char('h');
        draft.push_char('i');
        draft.toggle_focus();
        draft.push_char('/');
        draft.push_char('a');
        draft.backspace();

        assert_eq!(draft.text, "hi");
        assert_eq!(draft.image_input, "/");
        assert_eq!(draft.focus, DraftField::Image);
    }

    #[test]
    fn test_from_post_copies_text_and_image() {
        let image = ImageRef::Remote("https://example.com/a.png".to_string());
        let post = Post::new(PostId(4), "bonjour", Some(image.clone()));
        let draft = Draft::from_post(&post);

        assert_eq!(draft.text, "bonjour");
        assert_eq!(draft.image, Some(image));
        assert_eq!(draft.focus, DraftField::Text);
    }

    #[test]
    fn test_attach_image_resets_input() {
        let mut draft = Draft::empty();
        draft.toggle_focus();
        draft.image_input = "/tmp/cat.png".to_string();
        draft.pending_import = Some(3);
        assert!(draft.is_importing());

        draft.attach_image(ImageRef::Local("/media/cat.png".into()));

        assert!(draft.image_input.is_empty());
        assert!(!draft.is_importing());
        assert_eq!(draft.focus, DraftField::Text);
        assert!(draft.image.is_some());

        draft.remove_image();
        assert!(draft.image.is_none());
    }

    #[test]
    fn test_char_count_counts_chars() {
        let mut draft = Draft::empty();
        draft.text = "déjà".to_string();
        assert_eq!(draft.char_count(), 4);
    }
}
