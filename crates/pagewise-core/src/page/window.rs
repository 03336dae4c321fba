//! Module: page::window
//! Responsibility: translate a requested page into a bounded selection window.
//! Does not own: executing the selection; that belongs to the dataset.

use crate::page::{PageRequest, PageSize};
use candid::CandidType;
use serde::{Deserialize, Serialize};

///
/// SelectionWindow
///
/// `(limit, offset)` slice of an ordered selection.
/// Derived per request and never persisted.
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SelectionWindow {
    pub limit: u32,
    pub offset: u64,
}

impl SelectionWindow {
    /// Window covering one page of `page_size` records.
    #[must_use]
    pub fn for_page(page: PageRequest, page_size: PageSize) -> Self {
        let offset = (page.number() - 1).saturating_mul(page_size.as_u64());

        Self {
            limit: page_size.get(),
            offset,
        }
    }
}

/// Compute the selection window for a raw page number.
///
/// Page numbers below 1 are clamped to 1 before the offset is derived.
#[must_use]
pub fn window_for(page_number: i64, page_size: PageSize) -> SelectionWindow {
    SelectionWindow::for_page(PageRequest::new(page_number), page_size)
}

///
/// TESTS
///
