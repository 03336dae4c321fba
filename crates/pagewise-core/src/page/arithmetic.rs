//! Module: page::arithmetic
//! Responsibility: page count and page-for-entry math over totals.
//! Does not own: resolving totals from a dataset or clamping page requests.

use crate::page::PageSize;

/// Number of pages needed to hold `total` records.
///
/// An exact multiple of the page size adds no trailing empty page, and an
/// empty total has no pages at all.
#[must_use]
pub fn page_count(total: u64, page_size: PageSize) -> u64 {
    total.div_ceil(page_size.as_u64())
}

/// 1-based page holding the given 1-based entry index.
///
/// Entry index 0 is read as the first entry, so the result is always a
/// valid page number.
#[must_use]
pub fn page_for_entry(entry_index: u64, page_size: PageSize) -> u64 {
    entry_index.max(1).div_ceil(page_size.as_u64())
}

///
/// TESTS
///
