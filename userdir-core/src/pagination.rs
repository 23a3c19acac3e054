//! Page arithmetic for the user listing.
//!
//! An empty result set still has one (empty) page, and requested page numbers
//! outside `1..=num_pages` clamp to the nearest valid page.

use crate::errors::{DirectoryError, DirectoryResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: u64,
    per_page: u64,
}

/// The slice of the full result set that a resolved page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub offset: u64,
    pub limit: u64,
}

impl Paginator {
    pub fn new(count: u64, per_page: u32) -> DirectoryResult<Self> {
        if per_page == 0 {
            return Err(DirectoryError::InvalidPageSize(per_page));
        }
        Ok(Self {
            count,
            per_page: u64::from(per_page),
        })
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn num_pages(&self) -> u64 {
        self.count.div_ceil(self.per_page).max(1)
    }

    /// Resolves a raw `page` query value. Missing or non-numeric input means
    /// the first page.
    pub fn page(&self, requested: Option<&str>) -> PageWindow {
        let last = self.num_pages();
        let number = requested.map_or(1, |raw| resolve_number(raw.trim(), last));

        let offset = (number - 1) * self.per_page;
        PageWindow {
            number,
            offset,
            limit: self.per_page.min(self.count.saturating_sub(offset)),
        }
    }
}

// Any signed run of digits counts as a number, however long: negatives land on
// the first page, values past `last` (including u64 overflow) on the last.
fn resolve_number(raw: &str, last: u64) -> u64 {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || negative {
        return 1;
    }

    digits.parse::<u64>().map_or(last, |n| n.clamp(1, last))
}
