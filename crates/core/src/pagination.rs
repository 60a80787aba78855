//! Page slicing and the compact page-link window

use serde::{Deserialize, Serialize};

/// Pages shown on each side of the current page
const WINDOW_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLink {
    Previous { page: u32 },
    Page { number: u32, current: bool },
    Ellipsis,
    Next { page: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page actually requested
    pub page: u32,
    pub total_pages: u32,
    pub window: Vec<PageLink>,
}

impl<'a, T> Page<'a, T> {
    /// The requested page lies past the last one
    pub fn is_past_end(&self) -> bool {
        self.items.is_empty() && self.page > 1
    }
}

pub fn total_pages(total: usize, page_size: usize) -> u32 {
    let page_size = page_size.max(1);
    u32::try_from(total.div_ceil(page_size)).unwrap_or(u32::MAX)
}

/// Slice `items` for 1-based `page`. A page past the end is empty, not an error.
///
/// A `page_size` or `page` of zero is treated as one.
pub fn paginate<T>(items: &[T], page_size: usize, page: u32) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let start = (page as usize - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    let total_pages = total_pages(items.len(), page_size);
    Page {
        items: &items[start..end],
        page,
        total_pages,
        window: page_window(page, total_pages),
    }
}

/// Links for rendering: Previous, first, gap, current ±2, gap, last, Next.
///
/// Nothing is shown when everything fits on a single page.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let mut links = Vec::new();
    if current > 1 {
        links.push(PageLink::Previous { page: current - 1 });
    }

    let lo = current.saturating_sub(WINDOW_RADIUS).max(1);
    let hi = current.saturating_add(WINDOW_RADIUS).min(total_pages);

    if lo > 1 {
        links.push(PageLink::Page { number: 1, current: false });
        if lo > 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    for number in lo..=hi {
        links.push(PageLink::Page { number, current: number == current });
    }
    if hi < total_pages {
        if hi < total_pages - 1 {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page { number: total_pages, current: false });
    }

    if current < total_pages {
        links.push(PageLink::Next { page: current + 1 });
    }
    links
}
