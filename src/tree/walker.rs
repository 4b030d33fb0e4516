//! TreeWalker - depth-first, pre-order walk over a remote folder tree

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::Result;

use super::config::WalkerConfig;
use super::fetch::{FolderListing, fetch_children};
use super::item::Item;

/// Action applied to every folder and file the walker reaches.
pub trait Visitor {
    fn handle(&mut self, item: &Item) -> Result<()>;
}

impl<F> Visitor for F
where
    F: FnMut(&Item) -> Result<()>,
{
    fn handle(&mut self, item: &Item) -> Result<()> {
        self(item)
    }
}

/// Visitor that keeps a copy of every item it sees.
#[derive(Debug, Default)]
pub struct ItemCollector {
    pub items: Vec<Item>,
}

impl ItemCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.id.as_str()).collect()
    }
}

impl Visitor for ItemCollector {
    fn handle(&mut self, item: &Item) -> Result<()> {
        self.items.push(item.clone());
        Ok(())
    }
}

/// Counts of what a walk visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub folders: usize,
    pub files: usize,
}

/// Pending work on the walker's stack.
enum Pending {
    Expand { folder: Item, depth: usize },
    Visit(Item),
}

/// Walks a folder tree with an explicit work stack.
///
/// Each folder is visited before its children. Its subfolders are then
/// walked completely, in listing order, and only after that are its files
/// visited, also in listing order. Entries that are neither files nor
/// folders (web links) are skipped.
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    fn at_max_depth(&self, depth: usize) -> bool {
        self.config.max_depth.is_some_and(|max| depth >= max)
    }

    /// Walk the tree under `root`, handing every item to `visitor`.
    ///
    /// A listing or visitor failure stops the walk at once; whatever was
    /// visited before it stays visited.
    pub fn walk<L, V>(&self, listing: &L, root: Item, visitor: &mut V) -> Result<WalkSummary>
    where
        L: FolderListing + ?Sized,
        V: Visitor + ?Sized,
    {
        let fields = self.config.request_fields();
        let mut summary = WalkSummary::default();
        // Folder ids already expanded. A repeat would mean a cycle.
        let mut expanded: HashSet<String> = HashSet::new();
        let mut stack = vec![Pending::Expand {
            folder: root,
            depth: 0,
        }];

        while let Some(next) = stack.pop() {
            match next {
                Pending::Visit(file) => {
                    visitor.handle(&file)?;
                    summary.files += 1;
                }
                Pending::Expand { folder, depth } => {
                    if !expanded.insert(folder.id.clone()) {
                        warn!(folder_id = %folder.id, path = %folder.path(), "folder already walked, skipping");
                        continue;
                    }

                    visitor.handle(&folder)?;
                    summary.folders += 1;

                    if self.at_max_depth(depth) {
                        continue;
                    }

                    let children =
                        fetch_children(listing, &folder.id, self.config.page_size, &fields)?;
                    let (folders, others): (Vec<Item>, Vec<Item>) =
                        children.into_iter().partition(Item::is_folder);

                    // Reversed so that popping yields listing order.
                    for item in others.into_iter().rev() {
                        if item.is_file() {
                            stack.push(Pending::Visit(item));
                        } else {
                            debug!(id = %item.id, kind = item.item_type.as_str(), "skipping item");
                        }
                    }
                    for subfolder in folders.into_iter().rev() {
                        stack.push(Pending::Expand {
                            folder: subfolder,
                            depth: depth + 1,
                        });
                    }
                }
            }
        }

        info!(folders = summary.folders, files = summary.files, "walk complete");
        Ok(summary)
    }
}
