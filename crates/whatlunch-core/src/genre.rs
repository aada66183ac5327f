//! Food genres and their mapping onto places-index category codes and
//! search keywords.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Places-index category group codes for food venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryCode {
    #[serde(rename = "FD6")]
    Fd6,
    #[serde(rename = "FD4")]
    Fd4,
    #[serde(rename = "FD5")]
    Fd5,
    #[serde(rename = "FD3")]
    Fd3,
    #[serde(rename = "FD7")]
    Fd7,
}

/// The recognized food-category set. Keyword matches outside it are dropped.
pub const FOOD_CATEGORIES: [CategoryCode; 5] = [
    CategoryCode::Fd6,
    CategoryCode::Fd4,
    CategoryCode::Fd5,
    CategoryCode::Fd3,
    CategoryCode::Fd7,
];

impl CategoryCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fd6 => "FD6",
            Self::Fd4 => "FD4",
            Self::Fd5 => "FD5",
            Self::Fd3 => "FD3",
            Self::Fd7 => "FD7",
        }
    }

    /// Looks up a raw `category_group_code` value from the index.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        FOOD_CATEGORIES.into_iter().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[serde(alias = "한식")]
    Korean,
    #[serde(alias = "일식")]
    Japanese,
    #[serde(alias = "중식")]
    Chinese,
    #[serde(alias = "양식")]
    Western,
    #[serde(alias = "기타")]
    Other,
    #[serde(alias = "랜덤")]
    Random,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Korean,
        Genre::Japanese,
        Genre::Chinese,
        Genre::Western,
        Genre::Other,
        Genre::Random,
    ];

    /// Every genre except [`Genre::Random`].
    pub const CONCRETE: [Genre; 5] = [
        Genre::Korean,
        Genre::Japanese,
        Genre::Chinese,
        Genre::Western,
        Genre::Other,
    ];

    /// Resolves [`Genre::Random`] to a concrete genre drawn uniformly from
    /// [`Genre::CONCRETE`]. Any other genre is returned unchanged.
    #[must_use]
    pub fn resolve<R: Rng>(self, rng: &mut R) -> Genre {
        match self {
            Genre::Random => Self::CONCRETE[rng.random_range(0..Self::CONCRETE.len())],
            concrete => concrete,
        }
    }

    /// Category filters used by the category-code search strategy.
    #[must_use]
    pub const fn categories(self) -> &'static [CategoryCode] {
        match self {
            Genre::Korean => &[CategoryCode::Fd6],
            Genre::Japanese => &[CategoryCode::Fd4],
            Genre::Chinese => &[CategoryCode::Fd5],
            Genre::Western => &[CategoryCode::Fd3],
            Genre::Other | Genre::Random => &FOOD_CATEGORIES,
        }
    }

    /// Query string used by the keyword search strategy.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Genre::Korean => "한식",
            Genre::Japanese => "일식",
            Genre::Chinese => "중식",
            Genre::Western => "양식",
            Genre::Other | Genre::Random => "음식점",
        }
    }

    /// Korean display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Genre::Korean => "한식",
            Genre::Japanese => "일식",
            Genre::Chinese => "중식",
            Genre::Western => "양식",
            Genre::Other => "기타",
            Genre::Random => "랜덤",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Genre::Korean => "Korean",
            Genre::Japanese => "Japanese",
            Genre::Chinese => "Chinese",
            Genre::Western => "Western",
            Genre::Other => "Other",
            Genre::Random => "Random",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown genre '{0}' (expected one of: korean, japanese, chinese, western, other, random)")]
pub struct ParseGenreError(pub String);

impl FromStr for Genre {
    type Err = ParseGenreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Genre::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(trimmed) || g.label() == trimmed)
            .ok_or_else(|| ParseGenreError(s.to_string()))
    }
}
