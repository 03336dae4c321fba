use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// PageToken
///
/// One entry in a condensed page link range.
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageToken {
    Page(u64),
    Ellipsis,
}

impl PageToken {
    #[must_use]
    pub const fn page(self) -> Option<u64> {
        match self {
            Self::Page(page) => Some(page),
            Self::Ellipsis => None,
        }
    }

    #[must_use]
    pub const fn is_ellipsis(self) -> bool {
        matches!(self, Self::Ellipsis)
    }
}

///
/// PageRange
///
/// Condensed, strictly increasing page list with one ellipsis per gap,
/// plus what presentation code needs to turn it into links.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageRange {
    tokens: Vec<PageToken>,
    page_param: String,
    current_page: u64,
    skip_param_names: Vec<String>,
}

impl PageRange {
    pub(crate) const fn new(
        tokens: Vec<PageToken>,
        page_param: String,
        current_page: u64,
        skip_param_names: Vec<String>,
    ) -> Self {
        Self {
            tokens,
            page_param,
            current_page,
            skip_param_names,
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &[PageToken] {
        &self.tokens
    }

    #[must_use]
    pub fn page_param(&self) -> &str {
        &self.page_param
    }

    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    #[must_use]
    pub fn skip_param_names(&self) -> &[String] {
        &self.skip_param_names
    }

    /// Iterate the page numbers in the range, skipping ellipsis markers.
    pub fn pages(&self) -> impl Iterator<Item = u64> + '_ {
        self.tokens.iter().filter_map(|token| token.page())
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<PageToken> {
        self.tokens
    }

    /// Build the query parameters for a link to `page`.
    ///
    /// Keys named in `skip_param_names` are dropped from `base` and the page
    /// parameter is set to `page`.
    #[must_use]
    pub fn link_params(
        &self,
        base: &BTreeMap<String, String>,
        page: u64,
    ) -> BTreeMap<String, String> {
        let mut params: BTreeMap<String, String> = base
            .iter()
            .filter(|(name, _)| !self.skip_param_names.iter().any(|skip| skip == *name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        params.insert(self.page_param.clone(), page.to_string());

        params
    }
}

impl<'a> IntoIterator for &'a PageRange {
    type Item = &'a PageToken;
    type IntoIter = std::slice::Iter<'a, PageToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

///
/// TESTS
///
