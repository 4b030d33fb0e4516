//! Configuration types for the tree walker

/// Fields requested for every listed item unless overridden.
pub const DEFAULT_FIELDS: &[&str] = &["id", "name", "path_collection", "size"];

/// Items requested per listing call unless overridden.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum number of items requested per listing call.
    pub page_size: usize,
    /// Item fields requested from the listing API.
    pub fields: Vec<String>,
    /// Folders deeper than this are visited but not listed.
    /// The starting folder is at depth 0.
    pub max_depth: Option<usize>,
}

impl WalkerConfig {
    /// Fields to request, with `type` always included since the walker
    /// splits children on it.
    pub fn request_fields(&self) -> Vec<String> {
        let mut fields = self.fields.clone();
        if !fields.iter().any(|f| f == "type") {
            fields.push("type".to_string());
        }
        fields
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            max_depth: None,
        }
    }
}
