//! Dataset-facing paging: the `Dataset` seam, sessions, single-page loads,
//! and snapshot batch traversal.

mod batch;
mod dataset;
pub mod memory;
mod response;
mod session;

#[cfg(test)]
mod tests;

pub use batch::{Batch, TraversalReport};
pub use dataset::{CountSpec, Dataset, KeyOf, Selection};
pub use response::{PageResponse, PageSummary};
pub use session::DatasetSession;
