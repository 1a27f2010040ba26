//! # Pagination Math
//!
//! Page clamping and item-range math for product listings.
//!
//! The storefront and the admin tables both page through products; this
//! module owns the arithmetic so both render the same "Showing 13-24 of 57"
//! ranges and the same page strips.
//!
//! ## Usage
//! ```rust
//! use freshmart_core::pagination::Pagination;
//!
//! let page = Pagination::new(57, 12, 2);
//! assert_eq!(page.total_pages, 5);
//! assert_eq!((page.from, page.to), (13, 24));
//! assert!(page.can_prev && page.can_next);
//! ```

use serde::{Deserialize, Serialize};

/// The computed state of one pagination view.
///
/// Construction never fails: an out-of-range requested page clamps into
/// `1..=total_pages`, and a zero item count collapses to a single empty
/// page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total items across all pages.
    pub total_items: u64,

    /// Items per page (never zero; a zero input is treated as one).
    pub page_size: u64,

    /// The clamped current page, always in `1..=total_pages`.
    pub current_page: u64,

    /// Number of pages, at least one.
    pub total_pages: u64,

    /// 1-based ordinal of the first item on this page, 0 when empty.
    pub from: u64,

    /// 1-based ordinal of the last item on this page, 0 when empty.
    pub to: u64,

    /// Whether a previous page exists.
    pub can_prev: bool,

    /// Whether a next page exists.
    pub can_next: bool,
}

impl Pagination {
    /// Computes pagination state from raw inputs.
    ///
    /// ## Arguments
    /// * `total_items` - Total matching items
    /// * `page_size` - Requested items per page (0 is normalized to 1)
    /// * `requested_page` - 1-based page the caller asked for; clamped
    pub fn new(total_items: u64, page_size: u64, requested_page: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        let current_page = requested_page.clamp(1, total_pages);

        let (from, to) = if total_items == 0 {
            (0, 0)
        } else {
            let from = (current_page - 1) * page_size + 1;
            let to = (current_page * page_size).min(total_items);
            (from, to)
        };

        Pagination {
            total_items,
            page_size,
            current_page,
            total_pages,
            from,
            to,
            can_prev: current_page > 1,
            can_next: current_page < total_pages,
        }
    }

    /// The full page strip, `1..=total_pages`.
    ///
    /// The UI renders this directly; with the listing caps in place the
    /// strip stays small enough that no windowing is needed.
    pub fn pages(&self) -> Vec<u64> {
        (1..=self.total_pages).collect()
    }

    /// SQL OFFSET for the current page.
    pub fn offset(&self) -> u64 {
        (self.current_page - 1) * self.page_size
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
