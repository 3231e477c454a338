//! Static fraud-risk lookup over three fixed tables.
//!
//! RULE: check() is total and pure. Unknown identifiers classify as
//! low risk with no complaints; a miss is never an error.
//!
//! Phone and card identifiers are normalized (whitespace, hyphens and
//! parentheses stripped). Website identifiers are matched verbatim,
//! case-sensitive and untrimmed.

use crate::{
    error::ShieldError,
    types::{Language, Localized},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Phone,
    Card,
    Website,
}

impl CheckCategory {
    pub const ALL: [CheckCategory; 3] = [
        CheckCategory::Phone,
        CheckCategory::Card,
        CheckCategory::Website,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CheckCategory::Phone   => "phone",
            CheckCategory::Card    => "card",
            CheckCategory::Website => "website",
        }
    }

    /// Turn raw user input into the table key for this category.
    pub fn normalize(self, raw: &str) -> String {
        match self {
            CheckCategory::Phone | CheckCategory::Card => normalize_identifier(raw),
            CheckCategory::Website => raw.to_string(),
        }
    }
}

impl FromStr for CheckCategory {
    type Err = ShieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckCategory::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ShieldError::unknown("check category", s))
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Key of the verdict badge text in the UI text table.
    pub fn verdict_key(self) -> &'static str {
        match self {
            RiskLevel::High   => "fraud.verdict.danger",
            RiskLevel::Medium => "fraud.verdict.warning",
            RiskLevel::Low    => "fraud.verdict.safe",
        }
    }
}

/// The outcome of a lookup, with reason text in one language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskRecord {
    pub risk_level:      RiskLevel,
    pub complaint_count: u32,
    pub reason:          String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEntry {
    pub risk:       RiskLevel,
    pub complaints: u32,
    pub reason:     Localized<String>,
}

/// One category's table plus the text reported on a miss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskTable {
    pub fallback_reason: Localized<String>,
    pub entries:         HashMap<String, RiskEntry>,
}

impl RiskTable {
    fn record(&self, language: Language, key: &str) -> RiskRecord {
        match self.entries.get(key) {
            Some(entry) => RiskRecord {
                risk_level:      entry.risk,
                complaint_count: entry.complaints,
                reason:          entry.reason.get(language).clone(),
            },
            None => RiskRecord {
                risk_level:      RiskLevel::Low,
                complaint_count: 0,
                reason:          self.fallback_reason.get(language).clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLookup {
    pub phone:   RiskTable,
    pub card:    RiskTable,
    pub website: RiskTable,
}

impl RiskLookup {
    pub fn table(&self, category: CheckCategory) -> &RiskTable {
        match category {
            CheckCategory::Phone   => &self.phone,
            CheckCategory::Card    => &self.card,
            CheckCategory::Website => &self.website,
        }
    }

    /// Classify `raw` in `category`. Every input yields a record.
    pub fn check(&self, language: Language, category: CheckCategory, raw: &str) -> RiskRecord {
        let key = category.normalize(raw);
        let record = self.table(category).record(language, &key);
        log::debug!(
            "risk_lookup: category={category} key={key:?} risk={:?} complaints={}",
            record.risk_level,
            record.complaint_count
        );
        record
    }

    /// True if `raw` normalizes to a key present in the category's table.
    pub fn contains(&self, category: CheckCategory, raw: &str) -> bool {
        self.table(category).entries.contains_key(&category.normalize(raw))
    }
}

/// Strip whitespace, hyphens and parentheses.
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(*c, '-' | '(' | ')'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_formatting_only() {
        assert_eq!(normalize_identifier("+7 (777) 123-45-67"), "+77771234567");
        assert_eq!(normalize_identifier("4400\t4301 2345-6789"), "4400430123456789");
        assert_eq!(normalize_identifier("+7.777"), "+7.777");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_identifier(" (8) 701 - 234 ");
        assert_eq!(normalize_identifier(&once), once);
    }

    #[test]
    fn website_keys_are_not_normalized() {
        assert_eq!(CheckCategory::Website.normalize(" kaspi.kz "), " kaspi.kz ");
        assert_eq!(CheckCategory::Phone.normalize(" 1 2 "), "12");
    }

    #[test]
    fn category_parses_by_name() {
        assert_eq!("card".parse::<CheckCategory>().unwrap(), CheckCategory::Card);
        assert!("email".parse::<CheckCategory>().is_err());
    }
}
