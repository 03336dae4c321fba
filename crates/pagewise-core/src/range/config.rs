use crate::page::PageRequest;
use serde::{Deserialize, Serialize};

///
/// PageLinkConfig
///
/// Presentation-side inputs for building a condensed page link range.
/// Every field has a default so partial configuration decodes cleanly.
///
/// Leading and trailing windows default to 2 pages; the neighborhood
/// around the current page defaults to 3.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct PageLinkConfig {
    pub page_param: String,
    pub min_leading_pages: u32,
    pub min_trailing_pages: u32,
    pub range_about_current_page: u32,
    pub num_pages: Option<u64>,
    pub current_page: Option<PageRequest>,
    pub skip_param_names: Vec<String>,
}

impl PageLinkConfig {
    pub const DEFAULT_PAGE_PARAM: &'static str = "page";
    pub const DEFAULT_MIN_LEADING_PAGES: u32 = 2;
    pub const DEFAULT_MIN_TRAILING_PAGES: u32 = 2;
    pub const DEFAULT_RANGE_ABOUT_CURRENT_PAGE: u32 = 3;

    #[must_use]
    pub fn new(num_pages: u64, current_page: impl Into<PageRequest>) -> Self {
        Self {
            num_pages: Some(num_pages),
            current_page: Some(current_page.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_page_param(mut self, page_param: impl Into<String>) -> Self {
        self.page_param = page_param.into();
        self
    }

    #[must_use]
    pub const fn with_min_leading_pages(mut self, pages: u32) -> Self {
        self.min_leading_pages = pages;
        self
    }

    #[must_use]
    pub const fn with_min_trailing_pages(mut self, pages: u32) -> Self {
        self.min_trailing_pages = pages;
        self
    }

    #[must_use]
    pub const fn with_range_about_current_page(mut self, pages: u32) -> Self {
        self.range_about_current_page = pages;
        self
    }

    #[must_use]
    pub fn with_skip_param_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_param_names = names.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for PageLinkConfig {
    fn default() -> Self {
        Self {
            page_param: Self::DEFAULT_PAGE_PARAM.to_string(),
            min_leading_pages: Self::DEFAULT_MIN_LEADING_PAGES,
            min_trailing_pages: Self::DEFAULT_MIN_TRAILING_PAGES,
            range_about_current_page: Self::DEFAULT_RANGE_ABOUT_CURRENT_PAGE,
            num_pages: None,
            current_page: None,
            skip_param_names: Vec::new(),
        }
    }
}

///
/// TESTS
///
