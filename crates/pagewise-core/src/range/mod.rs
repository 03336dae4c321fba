//! Module: range
//! Responsibility: collapse `1..=num_pages` into a short page link list.
//! Does not own: rendering links or reading request state; callers pass an
//! explicit `PageLinkConfig`.

mod config;
mod token;


pub use config::PageLinkConfig;
pub use token::{PageRange, PageToken};

use std::collections::BTreeSet;

/// Compute the condensed page link range for a configuration.
///
/// Returns `None` when there is nothing to paginate (`num_pages` absent,
/// 0, or 1). Otherwise the leading pages, trailing pages, and the
/// neighborhood of the current page are merged, and each gap between them
/// becomes a single ellipsis.
#[must_use]
pub fn compute_page_range(config: &PageLinkConfig) -> Option<PageRange> {
    let num_pages = config.num_pages.filter(|&pages| pages > 1)?;
    let current = config
        .current_page
        .unwrap_or_default()
        .number()
        .min(num_pages);

    let pages = candidate_pages(config, num_pages, current);
    let tokens = condense(&pages);

    Some(PageRange::new(
        tokens,
        config.page_param.clone(),
        current,
        config.skip_param_names.clone(),
    ))
}

// Union of the leading, trailing, and neighborhood windows, clamped into
// `1..=num_pages`.
fn candidate_pages(config: &PageLinkConfig, num_pages: u64, current: u64) -> BTreeSet<u64> {
    let leading = u64::from(config.min_leading_pages).min(num_pages);
    let trailing = u64::from(config.min_trailing_pages).min(num_pages);
    let about = u64::from(config.range_about_current_page);

    let mut pages = BTreeSet::new();
    pages.extend(1..=leading);
    if trailing > 0 {
        pages.extend((num_pages - trailing + 1)..=num_pages);
    }

    // The neighborhood always holds the current page, even when `about` is 0.
    let low = current.saturating_sub(about).max(1);
    let high = current
        .saturating_add(about)
        .saturating_sub(1)
        .max(current)
        .min(num_pages);
    pages.extend(low..=high);

    pages
}

fn condense(pages: &BTreeSet<u64>) -> Vec<PageToken> {
    let mut tokens = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<u64> = None;

    for &page in pages {
        if let Some(prev) = previous
            && page != prev + 1
        {
            tokens.push(PageToken::Ellipsis);
        }
        tokens.push(PageToken::Page(page));
        previous = Some(page);
    }

    tokens
}
