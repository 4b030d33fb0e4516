//! Test utilities: an in-memory folder listing.
//!
//! This module is only compiled for tests and benchmarks.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::tree::{FolderListing, Item, ItemPage};

/// A listing request as seen by [`FakeListing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub folder_id: String,
    pub limit: usize,
    pub offset: usize,
    pub fields: Vec<String>,
}

/// An in-memory listing API.
///
/// Serves pages out of fixed child lists, records every request, and can
/// be told to fail a given request for a folder.
#[derive(Default)]
pub struct FakeListing {
    folders: HashMap<String, Vec<Item>>,
    max_page: Option<usize>,
    failures: Vec<(String, usize)>,
    requests: RefCell<Vec<ListRequest>>,
}

impl FakeListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the children of a folder.
    pub fn with_folder(mut self, folder_id: &str, children: Vec<Item>) -> Self {
        self.folders.insert(folder_id.to_string(), children);
        self
    }

    /// Cap every page at `max` items regardless of the requested limit.
    pub fn with_max_page(mut self, max: usize) -> Self {
        self.max_page = Some(max);
        self
    }

    /// Fail the `nth` request (1-based) made for `folder_id`.
    pub fn fail_at(mut self, folder_id: &str, nth: usize) -> Self {
        self.failures.push((folder_id.to_string(), nth));
        self
    }

    /// All requests made so far, in order.
    pub fn requests(&self) -> Vec<ListRequest> {
        self.requests.borrow().clone()
    }

    /// Folder ids that were listed at least once, in first-request order.
    pub fn listed_folders(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for request in self.requests.borrow().iter() {
            if !seen.contains(&request.folder_id) {
                seen.push(request.folder_id.clone());
            }
        }
        seen
    }

    fn should_fail(&self, folder_id: &str) -> bool {
        let nth = self
            .requests
            .borrow()
            .iter()
            .filter(|r| r.folder_id == folder_id)
            .count();
        self.failures
            .iter()
            .any(|(id, at)| id == folder_id && *at == nth)
    }
}

impl FolderListing for FakeListing {
    fn list_items(
        &self,
        folder_id: &str,
        limit: usize,
        offset: usize,
        fields: &[String],
    ) -> Result<ItemPage> {
        self.requests.borrow_mut().push(ListRequest {
            folder_id: folder_id.to_string(),
            limit,
            offset,
            fields: fields.to_vec(),
        });

        if !self.failures.is_empty() && self.should_fail(folder_id) {
            return Err(Error::Api {
                status: 500,
                code: "internal_server_error".to_string(),
                message: format!("injected failure listing folder {folder_id}"),
            });
        }

        let children = self.folders.get(folder_id).ok_or_else(|| Error::Api {
            status: 404,
            code: "not_found".to_string(),
            message: format!("folder {folder_id} not found"),
        })?;

        let count = self.max_page.map_or(limit, |max| limit.min(max));
        let entries = children.iter().skip(offset).take(count).cloned().collect();
        Ok(ItemPage {
            entries,
            total_count: children.len() as u64,
        })
    }
}
