//! Gamaray action descriptors: parsing and the command-line front end.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod cli;
pub mod core;

#[cfg(test)]
pub mod test_support;

pub use crate::core::action::{Action, ActionKind, ParseActionError, parse, parse_with};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
