//! NextStep Navigator, served from Rust.
//!
//! The career-guidance site's behavior lives in a handful of small modules:
//! an injected [`storage::Storage`] capability, capped/deduplicated lists for
//! recently-viewed items and bookmarks, session personalization from static
//! content tables, shared header/footer fragments, and a few page widgets.
//! The optional `web` feature serves the site over HTTP; the default `cli`
//! feature drives the same library from the command line.

pub mod data;
pub mod lists;
pub mod loader;
pub mod partials;
pub mod session;
pub mod storage;
pub mod widgets;

#[cfg(feature = "web")]
pub mod web;

pub use data::{Category, MenuItem, Page, Recommendation, audience_label, greeting};
pub use lists::{BookmarkEntry, BookmarkExport, BookmarkList, ListEntry, RecentList};
pub use loader::{LoadNotice, LoadOptions, LoadOutcome, load_json};
pub use partials::{PartialSet, PartialsError, Theme};
pub use session::{ProfileError, ProfileForm, SessionProfile, SessionRegistry};
pub use storage::{JsonFileStore, MemoryStore, Storage, StorageError};
