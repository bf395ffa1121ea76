//! 1-based pagination
//!
//! Out-of-range requests are not errors: they produce an empty page.

use serde::{Deserialize, Serialize};

use super::result::Page;
use crate::record::Record;

/// Page number (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Items to skip before this page starts, or `None` if the request
    /// cannot address any item (page 0, size 0, or arithmetic overflow).
    pub fn offset(&self) -> Option<u64> {
        if self.page == 0 || self.size == 0 {
            return None;
        }
        (self.page - 1).checked_mul(self.size)
    }
}

/// Returns the sub-slice addressed by `request`
pub fn page_slice<'a, T>(items: &'a [T], request: &PageRequest) -> &'a [T] {
    let Some(offset) = request.offset() else {
        return &[];
    };
    let Ok(start) = usize::try_from(offset) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let size = usize::try_from(request.size).unwrap_or(usize::MAX);
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Builds a page over any slice, cloning the items on it
pub fn page_of<T: Clone>(items: &[T], request: &PageRequest) -> Page<T> {
    let total_items = items.len() as u64;
    let total_pages = if request.size == 0 {
        0
    } else {
        total_items.div_ceil(request.size)
    };
    Page {
        items: page_slice(items, request).to_vec(),
        page: request.page,
        size: request.size,
        total_items,
        total_pages,
    }
}

/// Skips `(page - 1) * size` records and takes `size`
pub fn paginate<'a>(records: &'a [Record], request: &PageRequest) -> Page<&'a Record> {
    let refs: Vec<&Record> = records.iter().collect();
    page_of(&refs, request)
}
