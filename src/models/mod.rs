//! Data models for Postboard

mod draft;
mod post;

pub use draft::{Draft, DraftField};
pub use post::{ImageRef, Post, PostId};
