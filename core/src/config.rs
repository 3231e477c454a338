//! Static data and timing for every panel.
//!
//! All tables and canned strings live as JSON under `core/data/`.
//! The same files are embedded at compile time for `builtin()` and can be
//! read from a directory at runtime with `load()`.

use crate::{
    achievements::AchievementsData,
    chat::ChatScript,
    dashboard::DashboardData,
    error::{ShieldError, ShieldResult},
    fraud_checker::FraudPanelData,
    keyword_responder::KeywordResponder,
    latency::LatencyConfig,
    risk_lookup::RiskLookup,
    types::{Language, Localized},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const RISK_TABLES_FILE:  &str = "risk_tables.json";
pub const CHAT_FILE:         &str = "chat.json";
pub const DASHBOARD_FILE:    &str = "dashboard.json";
pub const ACHIEVEMENTS_FILE: &str = "achievements.json";
pub const UI_TEXT_FILE:      &str = "ui_text.json";
pub const LATENCY_FILE:      &str = "latency.json";

const BUILTIN_RISK_TABLES:  &str = include_str!("../data/risk_tables.json");
const BUILTIN_CHAT:         &str = include_str!("../data/chat.json");
const BUILTIN_DASHBOARD:    &str = include_str!("../data/dashboard.json");
const BUILTIN_ACHIEVEMENTS: &str = include_str!("../data/achievements.json");
const BUILTIN_UI_TEXT:      &str = include_str!("../data/ui_text.json");
const BUILTIN_LATENCY:      &str = include_str!("../data/latency.json");

/// Localized UI labels keyed by dotted name, e.g. `fraud.title`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiText(HashMap<String, Localized<String>>);

impl UiText {
    pub fn try_get(&self, key: &str, language: Language) -> ShieldResult<&str> {
        self.0
            .get(key)
            .map(|text| text.text(language))
            .ok_or_else(|| ShieldError::MissingText { key: key.to_string() })
    }

    /// Label for `key`, or the key itself when absent.
    pub fn get<'a>(&'a self, key: &'a str, language: Language) -> &'a str {
        match self.try_get(key, language) {
            Ok(text) => text,
            Err(_) => {
                log::warn!("ui_text: no label for {key}");
                key
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ShieldConfig {
    pub risk_lookup:  RiskLookup,
    pub fraud_panel:  FraudPanelData,
    pub responder:    KeywordResponder,
    pub chat_script:  ChatScript,
    pub dashboard:    DashboardData,
    pub achievements: AchievementsData,
    pub ui_text:      UiText,
    pub latency:      LatencyConfig,
}

impl ShieldConfig {
    /// The data files embedded in the library.
    pub fn builtin() -> ShieldResult<Self> {
        Self::from_json(|name| {
            let content = match name {
                RISK_TABLES_FILE  => BUILTIN_RISK_TABLES,
                CHAT_FILE         => BUILTIN_CHAT,
                DASHBOARD_FILE    => BUILTIN_DASHBOARD,
                ACHIEVEMENTS_FILE => BUILTIN_ACHIEVEMENTS,
                UI_TEXT_FILE      => BUILTIN_UI_TEXT,
                LATENCY_FILE      => BUILTIN_LATENCY,
                other => return Err(ShieldError::unknown("data file", other)),
            };
            Ok(content.to_string())
        })
    }

    /// Load from a data directory laid out like `core/data/`.
    /// In tests, prefer ShieldConfig::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let config = Self::from_json(|name| {
            let path = format!("{data_dir}/{name}");
            std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}").into())
        })?;
        log::info!("config: loaded data from {data_dir}");
        Ok(config)
    }

    /// Replace both artificial delays.
    pub fn with_latency(mut self, check_delay: Duration, reply_delay: Duration) -> Self {
        self.latency = LatencyConfig {
            check_delay_ms: saturating_millis(check_delay),
            reply_delay_ms: saturating_millis(reply_delay),
        };
        self
    }

    pub fn instant(mut self) -> Self {
        self.latency = LatencyConfig::instant();
        self
    }

    fn from_json(mut read: impl FnMut(&str) -> ShieldResult<String>) -> ShieldResult<Self> {
        let risk_tables = read(RISK_TABLES_FILE)?;
        let chat = read(CHAT_FILE)?;

        let config = Self {
            risk_lookup:  serde_json::from_str(&risk_tables)?,
            fraud_panel:  serde_json::from_str(&risk_tables)?,
            responder:    serde_json::from_str(&chat)?,
            chat_script:  serde_json::from_str(&chat)?,
            dashboard:    serde_json::from_str(&read(DASHBOARD_FILE)?)?,
            achievements: serde_json::from_str(&read(ACHIEVEMENTS_FILE)?)?,
            ui_text:      serde_json::from_str(&read(UI_TEXT_FILE)?)?,
            latency:      serde_json::from_str(&read(LATENCY_FILE)?)?,
        };
        config.responder.validate()?;
        Ok(config)
    }
}

fn saturating_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
