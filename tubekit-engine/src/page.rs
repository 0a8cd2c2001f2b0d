// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pagination and sorting applied by every list-producing view.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tubekit_core::Video;

/// Page size used when the caller supplies none or a non-positive one.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// A normalized page request.
///
/// Pages are 1-based. Requests outside a sequence's range yield an empty
/// item list, never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: usize,
    pub limit: usize,
}

impl Page {
    /// Normalize raw page parameters: a page below 1 becomes 1, a
    /// non-positive limit becomes [`DEFAULT_PAGE_LIMIT`].
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: if page < 1 { 1 } else { page as usize },
            limit: if limit <= 0 {
                DEFAULT_PAGE_LIMIT
            } else {
                limit as usize
            },
        }
    }

    /// The first page with the default limit.
    pub fn first() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Cut one page out of an already-sorted sequence.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.page.saturating_sub(1) * self.limit)
            .take(self.limit)
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first()
    }
}

/// Video attribute to order a listing by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    CreatedAt,
    Views,
    Duration,
    Title,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort order for video listings.
///
/// The comparator is total: ties on the requested field are broken by
/// identifier, so repeated queries over an unchanged data set always return
/// the same pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl VideoSort {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Compare two videos under this sort order.
    pub fn compare(&self, a: &Video, b: &Video) -> Ordering {
        let ordering = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Views => a.views.cmp(&b.views),
            SortField::Duration => a.duration_secs.total_cmp(&b.duration_secs),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };

        let ordering = match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };

        ordering.then_with(|| a.id.cmp(&b.id))
    }

    /// Sort a sequence of videos in place.
    pub fn sort(&self, videos: &mut [Video]) {
        videos.sort_by(|a, b| self.compare(a, b));
    }
}

/// Newest first.
impl Default for VideoSort {
    fn default() -> Self {
        Self::descending(SortField::CreatedAt)
    }
}
