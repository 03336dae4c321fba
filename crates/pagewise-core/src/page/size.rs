use crate::{
    DEFAULT_PAGE_SIZE,
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use candid::CandidType;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// PageError
///
/// Precondition violations on page configuration.
/// These are caller bugs and are reported instead of being coerced.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum PageError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

impl PageError {
    pub(crate) const fn class(self) -> ErrorClass {
        match self {
            Self::ZeroPageSize => ErrorClass::InvariantViolation,
        }
    }
}

impl From<PageError> for InternalError {
    fn from(err: PageError) -> Self {
        Self::new(err.class(), ErrorOrigin::Page, err.to_string())
    }
}

///
/// PageSize
///
/// Maximum number of records on one page. Always at least 1, so page
/// arithmetic never divides by zero.
///

#[derive(
    CandidType,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    pub const DEFAULT: Self = Self(DEFAULT_PAGE_SIZE);

    /// Build a page size, rejecting zero.
    pub const fn new(size: u32) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::ZeroPageSize);
        }

        Ok(Self(size))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    // Widened for arithmetic against u64 totals and offsets.
    pub(crate) fn as_u64(self) -> u64 {
        u64::from(self.0)
    }

    // Widened for chunking in-memory key lists.
    pub(crate) fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PageError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

///
/// TESTS
///
