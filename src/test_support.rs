//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::Cell;

use url::Url;

use crate::core::locator::{AbsoluteUrls, MakeUrl};

/// Parses a URL that the test knows is valid.
pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// An absolute-URL maker that counts how often it is asked.
#[derive(Default)]
pub struct CountingUrls {
    calls: Cell<usize>,
}

impl CountingUrls {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl MakeUrl for CountingUrls {
    fn make_url(&self, input: &str) -> Option<Url> {
        self.calls.set(self.calls.get() + 1);
        AbsoluteUrls.make_url(input)
    }
}
