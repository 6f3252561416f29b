//! The client's address bar: a shareable location plus back/forward history.
//!
//! A location looks like `cinematch://recommendations?query=noir&page=2`.
//! `page` is the only persisted pagination state; its absence means page 1.

use std::fmt;

use url::Url;

pub const SCHEME: &str = "cinematch";
pub const PAGE_PARAM: &str = "page";
pub const QUERY_PARAM: &str = "query";

const HOME: &str = "cinematch://recommendations";

/// Maximum number of history entries to keep.
const MAX_HISTORY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(Url);

impl Location {
    pub fn home() -> Self {
        Self(Url::parse(HOME).expect("HOME is a valid URL"))
    }

    /// Parse what the user typed into the address bar.
    ///
    /// Anything that is not an absolute URL is resolved against the home
    /// location, so `?page=3` and `recommendations?query=x` both work.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let raw = raw.trim();
        Url::parse(raw)
            .or_else(|_| Self::home().0.join(raw))
            .map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// First value of a query parameter.
    pub fn param(&self, key: &str) -> Option<String> {
        self.0
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Copy with `key` set to `value`, or removed when `value` is `None`.
    ///
    /// Other parameters keep their order. When nothing is left the query
    /// string is dropped entirely, so the canonical form has no bare `?`.
    pub fn with_param(&self, key: &str, value: Option<&str>) -> Self {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut replaced = false;
        for (k, v) in self.0.query_pairs() {
            if k == key {
                if let (Some(value), false) = (value, replaced) {
                    pairs.push((k.into_owned(), value.to_string()));
                    replaced = true;
                }
            } else {
                pairs.push((k.into_owned(), v.into_owned()));
            }
        }
        if let (Some(value), false) = (value, replaced) {
            pairs.push((key.to_string(), value.to_string()));
        }

        let mut url = self.0.clone();
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        Self(url)
    }

    /// Page number from the `page` parameter.
    ///
    /// Absent or non-numeric yields `default_page`; anything below 1 is
    /// coerced to 1.
    pub fn page(&self, default_page: usize) -> usize {
        self.param(PAGE_PARAM)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|n| n.max(1) as usize)
            .unwrap_or(default_page)
            .max(1)
    }

    /// Copy pointing at `page`; page 1 removes the parameter.
    pub fn with_page(&self, page: usize) -> Self {
        if page <= 1 {
            self.with_param(PAGE_PARAM, None)
        } else {
            self.with_param(PAGE_PARAM, Some(&page.to_string()))
        }
    }

    /// The search text carried by this location, if any.
    pub fn search_query(&self) -> Option<String> {
        self.param(QUERY_PARAM)
            .filter(|q| !q.trim().is_empty())
    }

    /// Copy for a fresh search: sets `query` and drops `page`.
    pub fn with_search_query(&self, query: &str) -> Self {
        self.with_param(QUERY_PARAM, Some(query))
            .with_param(PAGE_PARAM, None)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::home()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Back/forward history of visited locations.
#[derive(Debug, Clone)]
pub struct Navigator {
    entries: Vec<Location>,
    index: usize,
}

impl Navigator {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Visit `location`, discarding forward history.
    ///
    /// Returns `false` (and records nothing) when it equals the current one.
    pub fn push(&mut self, location: Location) -> bool {
        if *self.current() == location {
            return false;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
        true
    }

    /// Overwrite the current entry without creating history.
    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&Location> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Location> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Location::home())
    }
}
