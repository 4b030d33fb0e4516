//! Boxtree - list a Box folder tree as a JWT app service account

pub mod auth;
pub mod client;
pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use auth::{JwtAppConfig, authenticate};
pub use client::{BoxClient, ClientConfig, User};
pub use error::{Error, ErrorKind, Result};
pub use output::{JsonLinesPrinter, OutputConfig, PathPrinter};
pub use tree::{
    FolderListing, Item, ItemCollector, ItemType, TreeWalker, Visitor, WalkSummary, WalkerConfig,
    fetch_children,
};
