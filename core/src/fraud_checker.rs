//! Fraud checker panel.
//!
//! Holds the selected category, the input field and the last verdict.
//! A check computes its record immediately but reveals it only after
//! the configured delay; tearing the panel down cancels it.

use crate::{
    config::ShieldConfig,
    latency::Delayed,
    panel::Panel,
    risk_lookup::{CheckCategory, RiskLevel, RiskRecord},
    types::{Language, Tab},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FraudStats {
    pub total_checks:   u32,
    pub fraud_detected: u32,
    pub safe_transfers: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentCheck {
    pub value:    String,
    pub category: CheckCategory,
    pub risk:     RiskLevel,
    pub date:     String,
}

/// The static parts of the panel: headline stats and recent checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudPanelData {
    pub stats:         FraudStats,
    pub recent_checks: Vec<RecentCheck>,
}

/// A check that has been submitted but not yet revealed.
struct PendingCheck {
    category: CheckCategory,
    input:    String,
    result:   Delayed<RiskRecord>,
}

pub struct FraudChecker {
    config:   Arc<ShieldConfig>,
    category: CheckCategory,
    input:    String,
    result:   Option<RiskRecord>,
    pending:  Option<PendingCheck>,
}

impl FraudChecker {
    pub fn new(config: Arc<ShieldConfig>) -> Self {
        Self {
            config,
            category: CheckCategory::Phone,
            input:    String::new(),
            result:   None,
            pending:  None,
        }
    }

    pub fn category(&self) -> CheckCategory {
        self.category
    }

    /// Switching category keeps the input and the last verdict.
    pub fn select_category(&mut self, category: CheckCategory) {
        self.category = category;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Placeholder label key for the current category.
    pub fn placeholder_key(&self) -> &'static str {
        match self.category {
            CheckCategory::Phone   => "fraud.placeholder.phone",
            CheckCategory::Card    => "fraud.placeholder.card",
            CheckCategory::Website => "fraud.placeholder.website",
        }
    }

    pub fn is_checking(&self) -> bool {
        self.pending.is_some()
    }

    /// The check button is disabled for empty input or while a check runs.
    pub fn can_check(&self) -> bool {
        !self.input.is_empty() && !self.is_checking()
    }

    /// The last revealed verdict.
    pub fn result(&self) -> Option<&RiskRecord> {
        self.result.as_ref()
    }

    /// Submit the current input. Returns false if the button is disabled.
    pub fn start_check(&mut self, language: Language) -> bool {
        if !self.can_check() {
            return false;
        }
        let record = self.config.risk_lookup.check(language, self.category, &self.input);
        log::debug!(
            "fraud_checker: started {} check for {:?}",
            self.category,
            self.input
        );
        self.pending = Some(PendingCheck {
            category: self.category,
            input:    self.input.clone(),
            result:   Delayed::schedule(self.config.latency.check_delay(), record),
        });
        true
    }

    /// Wait for the pending check and store its verdict.
    ///
    /// Returns `None` if nothing was pending or the check was cancelled.
    pub async fn finish_check(&mut self) -> Option<&RiskRecord> {
        let pending = self.pending.take()?;
        let record = pending.result.wait().await?;
        log::debug!(
            "fraud_checker: {} {:?} -> {:?} ({} complaints)",
            pending.category,
            pending.input,
            record.risk_level,
            record.complaint_count
        );
        self.result = Some(record);
        self.result.as_ref()
    }

    /// Select, type, submit and wait, as a user would.
    pub async fn check(
        &mut self,
        language: Language,
        category: CheckCategory,
        value: &str,
    ) -> Option<RiskRecord> {
        self.select_category(category);
        self.set_input(value);
        if !self.start_check(language) {
            return None;
        }
        self.finish_check().await.cloned()
    }

    pub fn stats(&self) -> &FraudStats {
        &self.config.fraud_panel.stats
    }

    pub fn recent_checks(&self) -> &[RecentCheck] {
        &self.config.fraud_panel.recent_checks
    }
}

impl Panel for FraudChecker {
    fn tab(&self) -> Tab {
        Tab::Fraud
    }

    fn teardown(&mut self) -> usize {
        match self.pending.take() {
            Some(pending) => {
                pending.result.cancel();
                log::debug!("fraud_checker: cancelled pending {} check", pending.category);
                1
            }
            None => 0,
        }
    }
}
