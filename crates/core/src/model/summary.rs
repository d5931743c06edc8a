use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Named summary regeneration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SummaryStyle {
    /// Expanded revision sheet: structured sections, tips and mnemonics.
    #[default]
    #[serde(rename = "cheatSheet")]
    CheatSheet,
    /// Compressed rewrite, roughly 30% of the original length.
    #[serde(rename = "shrink")]
    Shrink,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown summary style: {0}")]
pub struct UnknownStyle(pub String);

impl FromStr for SummaryStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cheatSheet" | "cheat-sheet" | "cheat_sheet" => Ok(Self::CheatSheet),
            "shrink" => Ok(Self::Shrink),
            other => Err(UnknownStyle(other.to_owned())),
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheatSheet => f.write_str("cheatSheet"),
            Self::Shrink => f.write_str("shrink"),
        }
    }
}
