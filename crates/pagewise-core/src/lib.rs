//! Core runtime for Pagewise: page arithmetic and windows, snapshot batch
//! traversal over keyed datasets, page link ranges, and observability.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod obs;
pub mod page;
pub mod range;
pub mod traits;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Page size used when a dataset handle has not been given one explicitly.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{Batch, CountSpec, Dataset, DatasetSession, Selection},
        page::{PageRequest, PageSize, SelectionWindow},
        range::{PageLinkConfig, PageRange, PageToken},
        traits::Keyed,
    };
}
