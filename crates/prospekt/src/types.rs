use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafletRecord {
    pub title: String,
    pub thumbnail: String,
    pub shop_name: String,
    pub valid_from: String,
    pub valid_to: String,
    pub parsed_time: String,
}

impl Display for LeafletRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.shop_name, self.title)?;
        match (self.valid_from.is_empty(), self.valid_to.is_empty()) {
            (false, false) => write!(f, " ({} to {})", self.valid_from, self.valid_to),
            (false, true) => write!(f, " (from {})", self.valid_from),
            _ => Ok(()),
        }
    }
}

/// A grid item that could not be turned into a [`LeafletRecord`].
#[derive(Debug)]
pub struct SkippedItem {
    /// Zero-based position of the item among all `.grid-item` nodes.
    pub index: usize,
    pub error: ParseError,
}

impl Display for SkippedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "leaflet #{}: {}", self.index + 1, self.error)
    }
}

#[derive(Debug, Default)]
pub struct ExtractOutcome {
    pub records: Vec<LeafletRecord>,
    pub skipped: Vec<SkippedItem>,
}
