//! Die ratings and modified stats
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-die rating used for defense, pilot skill and weapon firepower.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "2d4")]
    D4,
    #[serde(rename = "2d6")]
    D6,
    #[serde(rename = "2d8")]
    D8,
    #[serde(rename = "2d10")]
    D10,
    #[serde(rename = "2d12")]
    D12,
}

impl Rating {
    pub const ALL: [Self; 5] = [Self::D4, Self::D6, Self::D8, Self::D10, Self::D12];

    /// Number of sides on each of the two dice.
    #[must_use]
    pub const fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
        }
    }

    #[must_use]
    pub const fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D4 => "2d4",
            Self::D6 => "2d6",
            Self::D8 => "2d8",
            Self::D10 => "2d10",
            Self::D12 => "2d12",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rating with a flat modifier, e.g. `2d8+1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stat {
    pub rating: Rating,
    #[serde(default)]
    pub modifier: i32,
}

impl Stat {
    #[must_use]
    pub const fn new(rating: Rating) -> Self {
        Self {
            rating,
            modifier: 0,
        }
    }

    #[must_use]
    pub const fn with_modifier(rating: Rating, modifier: i32) -> Self {
        Self { rating, modifier }
    }
}

impl From<Rating> for Stat {
    fn from(rating: Rating) -> Self {
        Self::new(rating)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}", self.rating),
            m if m > 0 => write!(f, "{}+{m}", self.rating),
            m => write!(f, "{}{m}", self.rating),
        }
    }
}
