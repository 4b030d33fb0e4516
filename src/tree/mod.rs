//! Remote folder tree walking
//!
//! This module lists and walks a remote folder hierarchy:
//!
//! - `fetch_children`: pages through a folder's immediate children
//! - `TreeWalker`: walks a whole tree, folders before files, with an explicit stack

mod config;
mod fetch;
mod item;
mod walker;

// Re-export public types
pub use config::{DEFAULT_FIELDS, DEFAULT_PAGE_SIZE, WalkerConfig};
pub use fetch::{FolderListing, fetch_children};
pub use item::{Item, ItemPage, ItemType};
pub use walker::{ItemCollector, TreeWalker, Visitor, WalkSummary};
