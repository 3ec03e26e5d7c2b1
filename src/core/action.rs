//! # Actions
//!
//! A viewer can be told to do exactly three things: refresh what it shows,
//! open a webpage, or jump to another dimension. Content describes these as
//! short descriptor strings:
//!
//! ```text
//! "refresh"                         →  Action::Refresh
//! "webpage: https://example.com"    →  Action::OpenWebpage(url)
//! "dimension: https://x.org/d/7"    →  Action::OpenDimension(url)
//! ```
//!
//! `parse()` is a pure function of its input. Anything that doesn't fit the
//! grammar (unknown keyword, missing payload, payload that isn't a URL) comes
//! back as `None`, with no reason attached. A caller that gets `None` performs
//! no action.
//!
//! Parsing is one split on the first `": "`, one keyword match, and at most one
//! call into a [`MakeUrl`].

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::locator::{AbsoluteUrls, MakeUrl};

/// Separates the keyword from the payload in a descriptor.
pub const SEPARATOR: &str = ": ";

/// The tag of an [`Action`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Refresh,
    OpenWebpage,
    OpenDimension,
}

impl ActionKind {
    /// Every kind, in declaration order.
    pub const ALL: [ActionKind; 3] = [
        ActionKind::Refresh,
        ActionKind::OpenWebpage,
        ActionKind::OpenDimension,
    ];

    /// The descriptor keyword for this kind.
    pub const fn keyword(self) -> &'static str {
        match self {
            ActionKind::Refresh => "refresh",
            ActionKind::OpenWebpage => "webpage",
            ActionKind::OpenDimension => "dimension",
        }
    }

    /// Exact, case-sensitive keyword lookup.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Whether actions of this kind carry a URL.
    pub const fn requires_url(self) -> bool {
        !matches!(self, ActionKind::Refresh)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Something a viewer should do.
///
/// Only the navigating variants hold a URL, so "refresh with a URL" or
/// "webpage without one" can't be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum Action {
    Refresh,
    OpenWebpage(Url),
    OpenDimension(Url),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Refresh => ActionKind::Refresh,
            Action::OpenWebpage(_) => ActionKind::OpenWebpage,
            Action::OpenDimension(_) => ActionKind::OpenDimension,
        }
    }

    /// The target URL. `None` exactly when this is `Refresh`.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Action::Refresh => None,
            Action::OpenWebpage(url) | Action::OpenDimension(url) => Some(url),
        }
    }

    /// Consumes the action, returning its URL if it has one.
    pub fn into_url(self) -> Option<Url> {
        match self {
            Action::Refresh => None,
            Action::OpenWebpage(url) | Action::OpenDimension(url) => Some(url),
        }
    }
}

/// Writes the canonical descriptor, which parses back to an equal action.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url() {
            None => f.write_str(self.kind().keyword()),
            Some(url) => write!(f, "{}{}{}", self.kind().keyword(), SEPARATOR, url),
        }
    }
}

/// A descriptor didn't describe an action. Carries no reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseActionError;

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid action descriptor")
    }
}

impl std::error::Error for ParseActionError {}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(Some(s)).ok_or(ParseActionError)
    }
}

/// Splits a descriptor at the first `": "` into keyword and payload.
///
/// Nothing is trimmed. `"dimension: "` yields an empty payload, while
/// `"dimension"` and `"dimension:"` yield none.
pub fn split_descriptor(descriptor: &str) -> (&str, Option<&str>) {
    match descriptor.split_once(SEPARATOR) {
        Some((keyword, payload)) => (keyword, Some(payload)),
        None => (descriptor, None),
    }
}

/// Parses a descriptor, requiring absolute URLs for navigating actions.
pub fn parse(input: Option<&str>) -> Option<Action> {
    parse_with(input, &AbsoluteUrls)
}

/// Parses a descriptor, building URLs with `urls`.
pub fn parse_with<M>(input: Option<&str>, urls: &M) -> Option<Action>
where
    M: MakeUrl + ?Sized,
{
    let descriptor = input?;
    let (keyword, payload) = split_descriptor(descriptor);

    let Some(kind) = ActionKind::from_keyword(keyword) else {
        debug!("Unrecognized action keyword: {:?}", keyword);
        return None;
    };

    if !kind.requires_url() {
        return Some(Action::Refresh);
    }

    let payload = match payload {
        Some(p) if !p.is_empty() => p,
        _ => {
            debug!("Action '{}' is missing its URL", kind);
            return None;
        }
    };

    let Some(url) = urls.make_url(payload) else {
        debug!("Action '{}' has an invalid URL: {:?}", kind, payload);
        return None;
    };

    Some(match kind {
        ActionKind::Refresh => Action::Refresh,
        ActionKind::OpenWebpage => Action::OpenWebpage(url),
        ActionKind::OpenDimension => Action::OpenDimension(url),
    })
}
