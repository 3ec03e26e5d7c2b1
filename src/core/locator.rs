//! # URL Construction
//!
//! The parser never validates URLs itself. It hands the payload to a
//! `MakeUrl` and takes whatever comes back: `Some(url)` or nothing.
//!
//! ```text
//! "webpage: https://example.com"
//!            └──────┬────────┘
//!                   ▼
//!            MakeUrl::make_url  →  Option<Url>
//! ```
//!
//! Two implementations ship here:
//!
//! - [`AbsoluteUrls`]: the payload must be a complete URL (`scheme:...`).
//! - [`RelativeUrls`]: the payload is resolved against a base, so a bare
//!   dimension name like `scene-7` becomes `<base>/scene-7`.
//!
//! `url::Url` follows the WHATWG parser, which quietly strips surrounding
//! spaces and drops tabs/newlines. Payloads are passed verbatim, so both
//! implementations refuse anything the parser would have rewritten that way.

use url::Url;

/// Turns a descriptor payload into a URL, or nothing.
pub trait MakeUrl {
    fn make_url(&self, input: &str) -> Option<Url>;
}

impl<F> MakeUrl for F
where
    F: Fn(&str) -> Option<Url>,
{
    fn make_url(&self, input: &str) -> Option<Url> {
        self(input)
    }
}

/// Accepts only absolute URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteUrls;

impl MakeUrl for AbsoluteUrls {
    fn make_url(&self, input: &str) -> Option<Url> {
        if !is_verbatim(input) {
            return None;
        }
        Url::parse(input).ok()
    }
}

/// Resolves payloads against a base URL. Absolute payloads pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeUrls {
    base: Url,
}

impl RelativeUrls {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl MakeUrl for RelativeUrls {
    fn make_url(&self, input: &str) -> Option<Url> {
        if !is_verbatim(input) {
            return None;
        }
        self.base.join(input).ok()
    }
}

/// True if `input` is non-empty and free of whitespace and control characters.
fn is_verbatim(input: &str) -> bool {
    !input.is_empty()
        && !input
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
}
