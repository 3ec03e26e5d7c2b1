//! # Core Logic
//!
//! Descriptor parsing and the settings around it.
//! It knows nothing about terminals, files of descriptors, or output formats.
//!
//! ```text
//!        "webpage: https://example.com"
//!                      │
//!                      ▼
//!          ┌───────────────────────┐
//!          │   action::parse()     │──── locator::MakeUrl
//!          └───────────┬───────────┘       (AbsoluteUrls / RelativeUrls)
//!                      │
//!                      ▼
//!          Option<Action>  →  viewer (not here)
//! ```
//!
//! ## Modules
//!
//! - [`action`]: The `Action` enum and the descriptor grammar
//! - [`locator`]: How payloads become URLs
//! - [`config`]: Settings file and override resolution

pub mod action;
pub mod config;
pub mod locator;
