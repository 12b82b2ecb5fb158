use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-class direction of a bar relative to the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Down,
    Flat,
    Up,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Down, Label::Flat, Label::Up];

    pub fn value(self) -> i8 {
        match self {
            Label::Down => -1,
            Label::Flat => 0,
            Label::Up => 1,
        }
    }

    /// Dense class index used by the classifier (0, 1, 2).
    pub fn index(self) -> usize {
        match self {
            Label::Down => 0,
            Label::Flat => 1,
            Label::Up => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display category pushed to users: sell / hold / buy.
    pub fn display(self) -> &'static str {
        match self {
            Label::Down => "BÁN",
            Label::Flat => "GIỮ",
            Label::Up => "MUA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    Long,
    Short,
}

impl fmt::Display for EntrySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntrySide::Long => write!(f, "long"),
            EntrySide::Short => write!(f, "short"),
        }
    }
}

impl FromStr for EntrySide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "long" => Ok(EntrySide::Long),
            "short" => Ok(EntrySide::Short),
            other => Err(format!("unknown entry side: {}", other)),
        }
    }
}

/// Stop-loss / take-profit report for a hypothetical entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryAnalysis {
    pub symbol: String,
    pub entry_price: f64,
    pub side: EntrySide,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub supports: Vec<f64>,
    pub resistances: Vec<f64>,
}
