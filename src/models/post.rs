//! Post model

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a post, unique within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl PostId {
    /// The id that follows this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to the image attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "location")]
pub enum ImageRef {
    /// A file on the local filesystem
    Local(PathBuf),
    /// A remote URL (stored and shown, never fetched)
    Remote(String),
}

impl ImageRef {
    /// Parse user input into an image reference.
    ///
    /// `http://` and `https://` inputs are remote, anything else is a local
    /// path. A leading `~/` is expanded to the home directory. Blank input
    /// yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let lower = input.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Some(Self::Remote(input.to_string()));
        }

        if let Some(rest) = input.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return Some(Self::Local(home.join(rest)));
        }

        Some(Self::Local(PathBuf::from(input)))
    }

    /// Local path, if this is a local image
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::Local(path) => Some(path),
            Self::Remote(_) => None,
        }
    }

    /// Whether this image lives on a remote server
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Key used for the decoded image cache
    pub fn cache_key(&self) -> String {
        match self {
            Self::Local(path) => path.display().to_string(),
            Self::Remote(url) => url.clone(),
        }
    }

    /// Short label for list display (file name or URL)
    pub fn label(&self) -> String {
        match self {
            Self::Local(path) => path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
            Self::Remote(url) => url.clone(),
        }
    }

    /// Target to hand to the system opener
    pub fn open_target(&self) -> String {
        self.cache_key()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// A single feed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identifier
    pub id: PostId,
    /// Post content
    pub text: String,
    /// Optional attached image
    pub image: Option<ImageRef>,
    /// When the post was created
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a post stamped with the current time
    pub fn new(id: PostId, text: impl Into<String>, image: Option<ImageRef>) -> Self {
        Self {
            id,
            text: text.into(),
            image,
            created_at: Utc::now(),
        }
    }

    /// Get a short single-line preview of the text
    pub fn preview(&self, max_len: usize) -> String {
        let text = self.text.replace('\n', " ");
        if text.chars().count() <= max_len {
            text
        } else {
            let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }

    /// Get relative time string (e.g., "5m", "2h", "3d")
    pub fn relative_time(&self) -> String {
        let now = Utc::now();
        let duration = now.signed_duration_since(self.created_at);

        if duration.num_seconds() < 60 {
            format!("{}s", duration.num_seconds().max(0))
        } else if duration.num_minutes() < 60 {
            format!("{}m", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h", duration.num_hours())
        } else if duration.num_days() < 7 {
            format!("{}d", duration.num_days())
        } else {
            self.created_at.format("%b %d").to_string()
        }
    }
}
