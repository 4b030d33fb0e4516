//! JSON lines output

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::tree::{Item, Visitor};

/// Serializable view of an item for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonItem<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub name: &'a str,
    pub path: String,
    pub path_segments: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Item> for JsonItem<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: &item.id,
            item_type: item.item_type.as_str(),
            name: &item.name,
            path: item.path(),
            path_segments: &item.path_segments,
            size: item.size,
            modified_at: item.modified_at,
        }
    }
}

/// Writes each visited item as a single-line JSON object.
pub struct JsonLinesPrinter<W> {
    out: W,
}

impl<W: Write> JsonLinesPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for JsonLinesPrinter<W> {
    fn handle(&mut self, item: &Item) -> Result<()> {
        serde_json::to_writer(&mut self.out, &JsonItem::from(item)).map_err(std::io::Error::from)?;
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_json_lines() {
        let mut printer = JsonLinesPrinter::new(Vec::new());
        printer
            .handle(&Item::folder("0", "All Files", &[]))
            .unwrap();
        printer
            .handle(&Item::file("5", "a.txt", &["All Files", "docs"]).with_size(12))
            .unwrap();

        let out = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0]["type"], "folder");
        assert_eq!(lines[0]["path"], "All Files");
        assert!(lines[0].get("size").is_none());

        assert_eq!(lines[1]["id"], "5");
        assert_eq!(lines[1]["type"], "file");
        assert_eq!(lines[1]["path"], "All Files/docs/a.txt");
        assert_eq!(lines[1]["path_segments"][1], "docs");
        assert_eq!(lines[1]["size"], 12);
    }
}
