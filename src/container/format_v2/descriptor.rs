// src/container/format_v2/descriptor.rs
// In-memory application descriptor, owned and borrowed forms

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Launcher category an app is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppCategory {
    System,
    Game,
    Media,
    Productivity,
    Utility,
    Communication,
    Other,
}

impl AppCategory {
    pub const ALL: [AppCategory; 7] = [
        AppCategory::System,
        AppCategory::Game,
        AppCategory::Media,
        AppCategory::Productivity,
        AppCategory::Utility,
        AppCategory::Communication,
        AppCategory::Other,
    ];

    /// Exact, case-sensitive match on the stored text; anything else is `Other`
    pub fn from_text(text: &str) -> Self {
        Self::parse(text).unwrap_or(AppCategory::Other)
    }

    /// Strict parse, `None` for text outside the known set
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppCategory::System => "system",
            AppCategory::Game => "game",
            AppCategory::Media => "media",
            AppCategory::Productivity => "productivity",
            AppCategory::Utility => "utility",
            AppCategory::Communication => "communication",
            AppCategory::Other => "other",
        }
    }
}

impl fmt::Display for AppCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An application as the producer supplies it and the launcher receives it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppDescriptor {
    pub name: String,
    pub creator: String,
    pub category: String,
    /// RGB565 pixels, little-endian, row-major
    pub icon: Vec<u8>,
    pub code: Vec<u8>,
}

impl AppDescriptor {
    pub fn new(
        name: impl Into<String>,
        creator: impl Into<String>,
        category: impl Into<String>,
        icon: Vec<u8>,
        code: Vec<u8>,
    ) -> Self {
        AppDescriptor {
            name: name.into(),
            creator: creator.into(),
            category: category.into(),
            icon,
            code,
        }
    }

    pub fn category_kind(&self) -> AppCategory {
        AppCategory::from_text(&self.category)
    }
}

/// A validated container viewed in place; sections borrow the input buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppView<'a> {
    pub version: u32,
    pub name: Cow<'a, str>,
    pub creator: Cow<'a, str>,
    pub category: Cow<'a, str>,
    pub checksum: u32,
    pub icon: &'a [u8],
    pub code: &'a [u8],
}

impl AppView<'_> {
    pub fn category_kind(&self) -> AppCategory {
        AppCategory::from_text(&self.category)
    }

    pub fn to_descriptor(&self) -> AppDescriptor {
        AppDescriptor {
            name: self.name.clone().into_owned(),
            creator: self.creator.clone().into_owned(),
            category: self.category.clone().into_owned(),
            icon: self.icon.to_vec(),
            code: self.code.to_vec(),
        }
    }
}
