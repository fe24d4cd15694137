//! # Postboard 📝
//!
//! A small social-style feed for the terminal.
//!
//! ## Overview
//!
//! Postboard keeps a list of short posts in memory. Each post has an id, a
//! text and an optional image. You can write new posts, edit or delete
//! existing ones, and attach a local image (copied into a media folder) or a
//! remote image URL. Nothing but the configuration and imported images ever
//! touches the disk.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │  Owns the store, renders screens and runs the event loop    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │      Store      │ │       UI        │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • Add/Update    │ │ • List screen   │
//! │ • Theme         │ │ • Delete/List   │ │ • Add / Edit    │
//! │ • Media folder  │ │ • Dispatch      │ │ • Overlays      │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │      Media      │ │     Images      │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Validate      │ │ • Decode        │ │ • Post / PostId │
//! │ • Copy into lib │ │ • LRU cache     │ │ • ImageRef      │
//! │ • Remote refs   │ │ • Term graphics │ │ • Draft         │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`app`] - TUI application state and event loop
//! - [`config`] - Configuration management
//! - [`demo`] - Starter posts
//! - [`images`] - Image decoding and terminal rendering support
//! - [`media`] - Media library that imported images are copied into
//! - [`models`] - Data models (Post, `ImageRef`, Draft)
//! - [`store`] - In-memory post store
//! - [`theme`] - Theme support via ratatui-themes
//!
//! ## Example
//!
//! ```
//! use postboard::{Action, PostStore, PostId};
//!
//! let mut store = postboard::demo::starter_store();
//! let id = store.add("hello", None);
//! assert_eq!(id, PostId(3));
//! assert_eq!(store.list()[0].id, id);
//!
//! store.dispatch(Action::Delete { id }).unwrap();
//! assert_eq!(store.len(), 2);
//! # let _ = PostStore::new();
//! ```

#![doc(html_root_url = "https://docs.rs/postboard/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::similar_names)]
#![allow(clippy::if_same_then_else)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::branches_sharing_code)]
#![allow(clippy::wrong_self_convention)]
#![allow(clippy::return_self_not_must_use)]

pub mod app;
pub mod config;
pub mod demo;
pub mod images;
pub mod media;
pub mod models;
pub mod paths;
pub mod store;
pub mod theme;

// Re-export main types for convenience
pub use app::AppState;
pub use config::Config;
pub use media::{MediaError, MediaLibrary};
pub use models::{Draft, ImageRef, Post, PostId};
pub use store::{Action, PostStore, StoreError};
pub use theme::{Theme, ThemeColors};

// Re-export theme types from ratatui-themes crate
pub use ratatui_themes::{ThemeName, ThemePalette};

/// ASCII logo for the application
pub const LOGO: &str = r"
    ____             __  __                         __
   / __ \____  _____/ /_/ /_  ____  ____ __________/ /
  / /_/ / __ \/ ___/ __/ __ \/ __ \/ __ `/ ___/ __  /
 / ____/ /_/ (__  ) /_/ /_/ / /_/ / /_/ / /  / /_/ /
/_/    \____/____/\__/_.___/\____/\__,_/_/   \__,_/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
