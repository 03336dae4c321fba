//! Page arithmetic, page requests, and selection windows.
//!
//! Everything here is pure: no dataset access and no shared state.

mod arithmetic;
mod request;
mod size;
mod window;

pub use arithmetic::{page_count, page_for_entry};
pub use request::PageRequest;
pub use size::{PageError, PageSize};
pub use window::{SelectionWindow, window_for};
