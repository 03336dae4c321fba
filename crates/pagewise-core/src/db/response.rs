use crate::page::{PageRequest, SelectionWindow};
use candid::CandidType;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// PageResponse
///
/// Records for one requested page, with the clamped page number and the
/// window that produced them.
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq)]
pub struct PageResponse<R> {
    page: PageRequest,
    window: SelectionWindow,
    #[deref]
    #[into_iterator(owned, ref)]
    records: Vec<R>,
}

impl<R> PageResponse<R> {
    pub(crate) const fn new(page: PageRequest, window: SelectionWindow, records: Vec<R>) -> Self {
        Self {
            page,
            window,
            records,
        }
    }

    #[must_use]
    pub const fn page_number(&self) -> u64 {
        self.page.number()
    }

    #[must_use]
    pub const fn window(&self) -> SelectionWindow {
        self.window
    }

    #[must_use]
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

///
/// PageSummary
///
/// Position of one page within a paginated total.
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageSummary {
    pub page: u64,
    pub page_size: u32,
    pub total: u64,
    pub page_count: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageSummary {
    /// First entry on the page (1-based), or `None` past the end.
    #[must_use]
    pub fn first_entry(&self) -> Option<u64> {
        if self.page > self.page_count {
            return None;
        }

        Some(
            (self.page - 1)
                .saturating_mul(u64::from(self.page_size))
                .saturating_add(1),
        )
    }
}
