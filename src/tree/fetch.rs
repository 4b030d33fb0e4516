//! Paginated listing of a folder's immediate children

use tracing::debug;

use crate::error::{Error, Result};

use super::item::{Item, ItemPage};

/// A source of folder listings, one bounded page at a time.
///
/// Implemented by the HTTP client and by in-memory fakes.
pub trait FolderListing {
    fn list_items(
        &self,
        folder_id: &str,
        limit: usize,
        offset: usize,
        fields: &[String],
    ) -> Result<ItemPage>;
}

impl<L: FolderListing + ?Sized> FolderListing for &L {
    fn list_items(
        &self,
        folder_id: &str,
        limit: usize,
        offset: usize,
        fields: &[String],
    ) -> Result<ItemPage> {
        (**self).list_items(folder_id, limit, offset, fields)
    }
}

/// Fetch every immediate child of a folder.
///
/// Pages are requested sequentially, advancing the offset by the size of
/// the previous page, and the loop stops only on an empty page. A short
/// page does not end the listing. Server order is preserved.
pub fn fetch_children<L: FolderListing + ?Sized>(
    listing: &L,
    folder_id: &str,
    page_size: usize,
    fields: &[String],
) -> Result<Vec<Item>> {
    if page_size == 0 {
        return Err(Error::InvalidPageSize);
    }

    let mut items = Vec::new();
    let mut offset = 0;
    loop {
        let page = listing.list_items(folder_id, page_size, offset, fields)?;
        let fetched = page.entries.len();
        debug!(folder_id, offset, fetched, total = page.total_count, "fetched page");
        if fetched == 0 {
            break;
        }
        offset += fetched;
        items.extend(page.entries);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeListing;

    fn files(prefix: &str, count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item::file(format!("{prefix}{i}"), format!("{prefix}{i}.txt"), &["root"]))
            .collect()
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_empty_folder_issues_one_request() {
        let listing = FakeListing::new().with_folder("0", vec![]);
        let items = fetch_children(&listing, "0", 1000, &[]).unwrap();
        assert!(items.is_empty());
        assert_eq!(listing.requests().len(), 1);
        assert_eq!(listing.requests()[0].offset, 0);
    }

    #[test]
    fn test_exact_multiple_requests_trailing_empty_page() {
        let listing = FakeListing::new().with_folder("0", files("f", 2));
        let items = fetch_children(&listing, "0", 2, &[]).unwrap();
        assert_eq!(ids(&items), vec!["f0", "f1"]);

        let offsets: Vec<usize> = listing.requests().iter().map(|r| r.offset).collect();
        assert_eq!(offsets, vec![0, 2]);
    }

    #[test]
    fn test_short_page_does_not_terminate() {
        let listing = FakeListing::new().with_folder("0", files("f", 5));
        let items = fetch_children(&listing, "0", 2, &[]).unwrap();
        assert_eq!(ids(&items), vec!["f0", "f1", "f2", "f3", "f4"]);

        let offsets: Vec<usize> = listing.requests().iter().map(|r| r.offset).collect();
        assert_eq!(offsets, vec![0, 2, 4, 5]);
    }

    #[test]
    fn test_offset_advances_by_returned_count() {
        // The server may return fewer items than asked for mid-listing.
        let listing = FakeListing::new()
            .with_folder("0", files("f", 5))
            .with_max_page(3);
        let items = fetch_children(&listing, "0", 10, &[]).unwrap();
        assert_eq!(items.len(), 5);

        let offsets: Vec<usize> = listing.requests().iter().map(|r| r.offset).collect();
        assert_eq!(offsets, vec![0, 3, 5]);
        assert!(listing.requests().iter().all(|r| r.limit == 10));
    }

    #[test]
    fn test_request_count_over_page_sizes() {
        for total in 0..12 {
            for page_size in 1..5 {
                let listing = FakeListing::new().with_folder("0", files("f", total));
                let items = fetch_children(&listing, "0", page_size, &[]).unwrap();
                assert_eq!(items.len(), total);
                assert_eq!(
                    listing.requests().len(),
                    total.div_ceil(page_size) + 1,
                    "total={total} page_size={page_size}"
                );
            }
        }
    }

    #[test]
    fn test_fields_are_forwarded() {
        let listing = FakeListing::new().with_folder("0", files("f", 1));
        let fields = vec!["id".to_string(), "name".to_string()];
        fetch_children(&listing, "0", 10, &fields).unwrap();
        assert!(listing.requests().iter().all(|r| r.fields == fields));
    }

    #[test]
    fn test_zero_page_size_rejected_without_requests() {
        let listing = FakeListing::new().with_folder("0", files("f", 1));
        let err = fetch_children(&listing, "0", 0, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidPageSize));
        assert!(listing.requests().is_empty());
    }

    #[test]
    fn test_failure_propagates() {
        let listing = FakeListing::new()
            .with_folder("0", files("f", 4))
            .fail_at("0", 2);
        let err = fetch_children(&listing, "0", 2, &[]).unwrap_err();
        assert!(matches!(err, Error::Api { status: 500, .. }));
        assert_eq!(listing.requests().len(), 2);
    }

    #[test]
    fn test_unknown_folder_is_not_found() {
        let listing = FakeListing::new();
        let err = fetch_children(&listing, "404", 10, &[]).unwrap_err();
        assert!(matches!(err, Error::Api { status: 404, .. }));
    }
}
