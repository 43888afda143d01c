// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::room::{Room, RoomType};

/// Rooms shown per page by default.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Which rooms to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoomFilter {
    /// Every room.
    #[default]
    All,
    /// Only rooms of one type.
    Type(RoomType),
}

impl RoomFilter {
    /// Whether `room` passes the filter.
    #[must_use]
    pub fn matches(&self, room: &Room) -> bool {
        match self {
            RoomFilter::All => true,
            RoomFilter::Type(kind) => &room.kind == kind,
        }
    }

    /// The rooms passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, rooms: &'a [Room]) -> Vec<&'a Room> {
        rooms.iter().filter(|room| self.matches(room)).collect()
    }
}

impl fmt::Display for RoomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomFilter::All => f.write_str("All"),
            RoomFilter::Type(kind) => write!(f, "Type {kind}"),
        }
    }
}

/// One page of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page.
    pub items: &'a [T],
    /// 1-based page number, clamped to the available pages.
    pub page: usize,
    /// Number of pages, at least one.
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total: usize,
    page_size: usize,
}

impl<'a, T> Page<'a, T> {
    /// Cuts page `page` (1-based) of size `page_size` out of `items`.
    ///
    /// Out-of-range pages are clamped to the first or last page.
    #[must_use]
    pub fn of(items: &'a [T], page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total = items.len();
        let total_pages = total.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);

        let from = ((page - 1) * page_size).min(total);
        let to = (page * page_size).min(total);
        Self {
            items: items.get(from..to).unwrap_or_default(),
            page,
            total_pages,
            total,
            page_size,
        }
    }

    /// 1-based position of the first item on the page, 0 when empty.
    #[must_use]
    pub fn start_index(&self) -> usize {
        match self.total {
            0 => 0,
            _ => (self.page - 1) * self.page_size + 1,
        }
    }

    /// 1-based position of the last item on the page.
    #[must_use]
    pub fn end_index(&self) -> usize {
        (self.page * self.page_size).min(self.total)
    }

    /// Whether another page follows.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// A one-line summary such as `Showing 13-24 of 120`.
    #[must_use]
    pub fn summary(&self, noun: &str) -> String {
        match self.total {
            0 => format!("No {noun}"),
            n => format!("Showing {}-{} of {n}", self.start_index(), self.end_index()),
        }
    }
}
