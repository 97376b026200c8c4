use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page actually served, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

pub fn total_pages(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}

/// Clamps `requested` into `[1, total_pages]`. An empty list still has page 1.
pub fn clamp_page(requested: usize, len: usize, size: usize) -> usize {
    requested.clamp(1, total_pages(len, size).max(1))
}

/// Returns the slice `[(page-1)*size, page*size)` of `items` for the clamped page.
pub fn paginate<T: Clone>(items: &[T], requested: usize, size: usize) -> Page<T> {
    let size = size.max(1);
    let page = clamp_page(requested, items.len(), size);
    let start = ((page - 1) * size).min(items.len());
    let end = (start + size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages: total_pages(items.len(), size),
        total_items: items.len(),
    }
}

/// Page numbers remembered for the lifetime of one browsing session, keyed per view.
///
/// The owner decides when the session ends and calls [`PageSession::end`]; nothing
/// here reacts to navigation on its own.
#[derive(Debug, Clone, Default)]
pub struct PageSession {
    pages: HashMap<String, usize>,
}

impl PageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored page for `view`, or 1 when nothing is stored.
    pub fn current(&self, view: &str) -> usize {
        self.pages.get(view).copied().unwrap_or(1)
    }

    pub fn set(&mut self, view: &str, page: usize) {
        self.pages.insert(view.to_string(), page.max(1));
    }

    /// Navigation away or reload: every stored page is dropped.
    pub fn end(&mut self) {
        self.pages.clear();
    }
}
