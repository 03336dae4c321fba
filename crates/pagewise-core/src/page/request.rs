use candid::CandidType;
use derive_more::Display;
use serde::{Deserialize, Serialize, de::IgnoredAny};

///
/// PageRequest
///
/// A requested 1-based page number after clamping.
/// Anything that does not name a positive page (missing, non-numeric,
/// zero, negative) is read as page 1.
///

#[derive(
    CandidType,
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(into = "u64")]
pub struct PageRequest(u64);

impl PageRequest {
    pub const FIRST: Self = Self(1);

    /// Clamp a signed page number to a valid page.
    #[must_use]
    pub fn new(page_number: i64) -> Self {
        u64::try_from(page_number).map_or(Self::FIRST, Self::from_number)
    }

    /// Clamp an unsigned page number to a valid page.
    #[must_use]
    pub const fn from_number(page_number: u64) -> Self {
        if page_number == 0 {
            Self::FIRST
        } else {
            Self(page_number)
        }
    }

    /// Parse a raw request parameter value.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .map_or(Self::FIRST, Self::new)
    }

    #[must_use]
    pub const fn number(self) -> u64 {
        self.0
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::FIRST
    }
}

impl<'de> Deserialize<'de> for PageRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageRequestPayload {
            Signed(i64),
            Unsigned(u64),
            Text(String),
            Other(IgnoredAny),
        }

        // Decoding never fails on the page value itself; anything that is
        // not a positive page reads as page 1.
        let page = match PageRequestPayload::deserialize(deserializer)? {
            PageRequestPayload::Signed(number) => Self::new(number),
            PageRequestPayload::Unsigned(number) => Self::from_number(number),
            PageRequestPayload::Text(raw) => Self::from_param(Some(&raw)),
            PageRequestPayload::Other(_) => Self::FIRST,
        };

        Ok(page)
    }
}

impl From<i32> for PageRequest {
    fn from(page_number: i32) -> Self {
        Self::new(i64::from(page_number))
    }
}

impl From<i64> for PageRequest {
    fn from(page_number: i64) -> Self {
        Self::new(page_number)
    }
}

impl From<u64> for PageRequest {
    fn from(page_number: u64) -> Self {
        Self::from_number(page_number)
    }
}

impl From<PageRequest> for u64 {
    fn from(page: PageRequest) -> Self {
        page.0
    }
}

///
/// TESTS
///
