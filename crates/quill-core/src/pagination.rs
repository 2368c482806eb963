//! Numeric page-number pagination.
//!
//! A [`Paginator`] turns a requested page number and the total record count
//! into a [`PageWindow`]: the `(offset, limit)` slice to read from the ordered
//! sequence plus the neighbouring page numbers. Page numbers and page links in
//! the response are both derived from the same [`PageNeighbours`] value.
//!
//! Page 1 always exists, even for an empty collection.

use std::num::NonZeroU64;

use serde::Serialize;
use url::Url;

use crate::error::InvalidPage;

/// Query parameter carrying the requested page number.
pub const PAGE_QUERY_PARAM: &str = "page";

// ---------------------------------------------------------------------------
// Paginator
// ---------------------------------------------------------------------------

/// Fixed-size page arithmetic. Holds no per-request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: NonZeroU64,
}

impl Paginator {
    pub fn new(page_size: NonZeroU64) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.get()
    }

    /// `ceil(count / page_size)`, but never less than one.
    pub fn num_pages(&self, count: u64) -> u64 {
        if count == 0 {
            1
        } else {
            count.div_ceil(self.page_size())
        }
    }

    /// Parse the raw `page` query value. An absent parameter means page 1.
    ///
    /// Surrounding whitespace and a leading sign are accepted; anything else
    /// that is not a base-10 integer is rejected. Range is checked later by
    /// [`Paginator::window`].
    pub fn parse_page_number(raw: Option<&str>) -> Result<i64, InvalidPage> {
        match raw {
            None => Ok(1),
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| InvalidPage),
        }
    }

    /// Validate `number` against `count` and compute the slice to read.
    pub fn window(&self, number: i64, count: u64) -> Result<PageWindow, InvalidPage> {
        let num_pages = self.num_pages(count);
        let number = u64::try_from(number).map_err(|_| InvalidPage)?;
        if number < 1 || number > num_pages {
            return Err(InvalidPage);
        }

        let offset = (number - 1) * self.page_size();
        let limit = self.page_size().min(count.saturating_sub(offset));
        Ok(PageWindow {
            number,
            count,
            offset,
            limit,
            num_pages,
        })
    }

    /// [`Paginator::parse_page_number`] followed by [`Paginator::window`].
    pub fn window_for(&self, raw: Option<&str>, count: u64) -> Result<PageWindow, InvalidPage> {
        let number = Self::parse_page_number(raw)?;
        self.window(number, count)
    }
}

// ---------------------------------------------------------------------------
// Page window
// ---------------------------------------------------------------------------

/// A validated page: which slice to read and where it sits among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number.
    pub number: u64,
    /// Total number of records in the collection.
    pub count: u64,
    /// Index of the first record on this page.
    pub offset: u64,
    /// Number of records on this page (short on the last page, zero when empty).
    pub limit: u64,
    pub num_pages: u64,
}

impl PageWindow {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn neighbours(&self) -> PageNeighbours {
        PageNeighbours {
            next: self.has_next().then(|| self.number + 1),
            previous: self.has_previous().then(|| self.number - 1),
        }
    }
}

/// Next and previous page numbers, when those pages exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageNeighbours {
    pub next: Option<u64>,
    pub previous: Option<u64>,
}

impl PageNeighbours {
    /// The same neighbours as absolute URLs built from `request_url`.
    pub fn links(&self, request_url: &Url) -> PageLinks {
        PageLinks {
            next: self.next.map(|n| page_url(request_url, n).to_string()),
            previous: self.previous.map(|n| page_url(request_url, n).to_string()),
        }
    }
}

/// Navigable next/previous URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// `request_url` with its `page` parameter pointing at `number`.
///
/// Other query parameters are kept in order. Page 1 is addressed by dropping
/// the parameter altogether.
pub fn page_url(request_url: &Url, number: u64) -> Url {
    let kept: Vec<(String, String)> = request_url
        .query_pairs()
        .filter(|(key, _)| key != PAGE_QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = request_url.clone();
    if kept.is_empty() && number == 1 {
        url.set_query(None);
        return url;
    }

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(kept.iter());
        if number != 1 {
            pairs.append_pair(PAGE_QUERY_PARAM, &number.to_string());
        }
    }
    url
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One page of items together with its window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub window: PageWindow,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Build the response body. `request_url` is the absolute URL the page was
    /// requested with.
    pub fn into_body(self, request_url: &Url) -> PaginatedBody<T> {
        let neighbours = self.window.neighbours();
        PaginatedBody {
            links: neighbours.links(request_url),
            next: neighbours.next,
            previous: neighbours.previous,
            count: self.window.count,
            results: self.items,
        }
    }
}

/// Wire shape of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginatedBody<T> {
    pub links: PageLinks,
    pub next: Option<u64>,
    pub previous: Option<u64>,
    pub count: u64,
    pub results: Vec<T>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
