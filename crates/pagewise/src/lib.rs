//! ## Crate layout
//! - `core`: page arithmetic and windows, the dataset seam, snapshot batch
//!   traversal, page link ranges, and observability.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module carries the vocabulary most callers need.

pub use pagewise_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::DEFAULT_PAGE_SIZE;
pub use error::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        db::{
            Batch, CountSpec, Dataset, DatasetSession, PageResponse, PageSummary, Selection,
            TraversalReport,
        },
        page::{PageRequest, PageSize, SelectionWindow},
        range::{PageLinkConfig, PageRange, PageToken, compute_page_range},
        traits::Keyed,
    };
    pub use candid::CandidType;
    pub use serde::{Deserialize, Serialize};
}
