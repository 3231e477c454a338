//! Shared primitive types used across every panel.

use crate::error::ShieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A session-local chat message id. Monotonic within one session.
pub type MessageId = u64;

/// The canonical session identifier.
pub type SessionId = String;

/// Display language. Every user-facing string exists in both.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Ru,
    Kk,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Kk => "kk",
        }
    }
}

impl FromStr for Language {
    type Err = ShieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ru" => Ok(Language::Ru),
            "kk" => Ok(Language::Kk),
            other => Err(ShieldError::unknown("language", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// A value carried in both display languages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Localized<T> {
    pub ru: T,
    pub kk: T,
}

impl<T> Localized<T> {
    pub fn get(&self, language: Language) -> &T {
        match language {
            Language::Ru => &self.ru,
            Language::Kk => &self.kk,
        }
    }

    /// Both variants, Russian first.
    pub fn both(&self) -> [&T; 2] {
        [&self.ru, &self.kk]
    }
}

impl Localized<String> {
    pub fn text(&self, language: Language) -> &str {
        self.get(language).as_str()
    }
}

/// Top-level tabs of the app shell, in display order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    Fraud,
    Chat,
    Achievements,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Fraud, Tab::Chat, Tab::Achievements];

    pub fn name(self) -> &'static str {
        match self {
            Tab::Dashboard    => "dashboard",
            Tab::Fraud        => "fraud",
            Tab::Chat         => "chat",
            Tab::Achievements => "achievements",
        }
    }

    /// Key of the tab's label in the UI text table.
    pub fn label_key(self) -> &'static str {
        match self {
            Tab::Dashboard    => "tab.dashboard",
            Tab::Fraud        => "tab.fraud",
            Tab::Chat         => "tab.chat",
            Tab::Achievements => "tab.achievements",
        }
    }
}

impl FromStr for Tab {
    type Err = ShieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.name() == s)
            .ok_or_else(|| ShieldError::unknown("tab", s))
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
