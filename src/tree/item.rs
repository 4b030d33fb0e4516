//! Remote file and folder entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Kind of a remote entry, as reported in its `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Folder,
    File,
    WebLink,
    #[serde(other)]
    Other,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Folder => "folder",
            ItemType::File => "file",
            ItemType::WebLink => "web_link",
            ItemType::Other => "other",
        }
    }
}

/// A file or folder as returned by the listing API.
///
/// Each item carries its own snapshot of its ancestors' names, so the
/// full path never depends on where the walker found it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub name: String,
    #[serde(
        rename = "path_collection",
        default,
        deserialize_with = "path_collection_names"
    )]
    pub path_segments: Vec<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn folder(id: impl Into<String>, name: impl Into<String>, path_segments: &[&str]) -> Self {
        Self::new(ItemType::Folder, id, name, path_segments)
    }

    pub fn file(id: impl Into<String>, name: impl Into<String>, path_segments: &[&str]) -> Self {
        Self::new(ItemType::File, id, name, path_segments)
    }

    fn new(
        item_type: ItemType,
        id: impl Into<String>,
        name: impl Into<String>,
        path_segments: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            item_type,
            name: name.into(),
            path_segments: path_segments.iter().map(|s| s.to_string()).collect(),
            size: None,
            modified_at: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn is_folder(&self) -> bool {
        self.item_type == ItemType::Folder
    }

    pub fn is_file(&self) -> bool {
        self.item_type == ItemType::File
    }

    /// Canonical path: ancestor names and the item name joined by `/`,
    /// with leading and trailing slashes trimmed.
    pub fn path(&self) -> String {
        let mut path = self.path_segments.join("/");
        path.push('/');
        path.push_str(&self.name);
        path.trim_matches('/').to_string()
    }
}

#[derive(Deserialize)]
struct PathCollection {
    #[serde(default)]
    entries: Vec<PathEntry>,
}

#[derive(Deserialize)]
struct PathEntry {
    name: String,
}

fn path_collection_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let collection = Option::<PathCollection>::deserialize(deserializer)?;
    Ok(collection
        .map(|c| c.entries.into_iter().map(|e| e.name).collect())
        .unwrap_or_default())
}

/// One page of a folder listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPage {
    #[serde(default)]
    pub entries: Vec<Item>,
    #[serde(default)]
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_joins_segments_and_name() {
        let item = Item::file("1", "readme.txt", &["root", "docs"]);
        assert_eq!(item.path(), "root/docs/readme.txt");
    }

    #[test]
    fn test_path_of_root_folder() {
        let root = Item::folder("0", "All Files", &[]);
        assert_eq!(root.path(), "All Files");
    }

    #[test]
    fn test_path_trims_slashes() {
        let item = Item::file("1", "a.txt", &["", "docs", ""]);
        assert_eq!(item.path(), "docs//a.txt");

        let unnamed = Item::folder("2", "", &["docs"]);
        assert_eq!(unnamed.path(), "docs");
    }

    #[test]
    fn test_deserialize_listing_entry() {
        let json = r#"{
            "type": "file",
            "id": "12345",
            "name": "report.pdf",
            "size": 2048,
            "modified_at": "2024-03-01T10:15:00-08:00",
            "path_collection": {
                "total_count": 2,
                "entries": [
                    {"type": "folder", "id": "0", "name": "All Files"},
                    {"type": "folder", "id": "77", "name": "Reports"}
                ]
            }
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "12345");
        assert!(item.is_file());
        assert_eq!(item.size, Some(2048));
        assert_eq!(item.path_segments, vec!["All Files", "Reports"]);
        assert_eq!(item.path(), "All Files/Reports/report.pdf");
        assert!(item.modified_at.is_some());
    }

    #[test]
    fn test_deserialize_minimal_entry() {
        let item: Item = serde_json::from_str(r#"{"type": "folder", "id": "9"}"#).unwrap();
        assert!(item.is_folder());
        assert!(item.path_segments.is_empty());
        assert_eq!(item.size, None);
    }

    #[test]
    fn test_deserialize_unknown_type() {
        let link: Item =
            serde_json::from_str(r#"{"type": "web_link", "id": "3", "name": "x"}"#).unwrap();
        assert_eq!(link.item_type, ItemType::WebLink);

        let other: Item =
            serde_json::from_str(r#"{"type": "hubs", "id": "4", "name": "y"}"#).unwrap();
        assert_eq!(other.item_type, ItemType::Other);
    }

    #[test]
    fn test_deserialize_page() {
        let json = r#"{"total_count": 1, "entries": [{"type": "file", "id": "1", "name": "a"}],
                       "offset": 0, "limit": 1000}"#;
        let page: ItemPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.entries.len(), 1);
    }
}
