//! Dashboard panel: mode selector, canned insight, headline stats,
//! spending by category, six-month trend and recent transactions.
//!
//! All figures are static mock data. The only state is the selected mode.

use crate::{
    config::ShieldConfig,
    error::ShieldError,
    panel::Panel,
    types::{Language, Localized, Tab},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DashboardMode {
    Economy,
    Savings,
    #[default]
    Balance,
}

impl DashboardMode {
    pub const ALL: [DashboardMode; 3] = [
        DashboardMode::Economy,
        DashboardMode::Savings,
        DashboardMode::Balance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DashboardMode::Economy => "economy",
            DashboardMode::Savings => "savings",
            DashboardMode::Balance => "balance",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            DashboardMode::Economy => "dashboard.mode.economy",
            DashboardMode::Savings => "dashboard.mode.savings",
            DashboardMode::Balance => "dashboard.mode.balance",
        }
    }
}

impl FromStr for DashboardMode {
    type Err = ShieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardMode::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ShieldError::unknown("dashboard mode", s))
    }
}

impl fmt::Display for DashboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub economy: Localized<String>,
    pub savings: Localized<String>,
    pub balance: Localized<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_balance:    i64,
    pub balance_change:   Localized<String>,
    pub monthly_income:   i64,
    pub income_change:    Localized<String>,
    pub monthly_spending: i64,
    pub spending_change:  Localized<String>,
    pub savings_goal:     i64,
    /// Percent of the goal reached.
    pub savings_progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingCategory {
    pub key:    String,
    pub name:   Localized<String>,
    pub amount: i64,
    pub color:  String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month:    Localized<String>,
    pub income:   i64,
    pub spending: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id:       u32,
    pub name:     Localized<String>,
    pub category: Localized<String>,
    /// Signed amount in tenge; expenses are negative.
    pub amount:   i64,
    pub date:     String,
    pub kind:     TransactionKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub insights:     Insights,
    pub stats:        DashboardStats,
    pub categories:   Vec<SpendingCategory>,
    pub trends:       Vec<MonthlyTrend>,
    pub transactions: Vec<Transaction>,
}

/// A category with its share of total spending.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryShare<'a> {
    pub key:     &'a str,
    pub name:    &'a str,
    pub amount:  i64,
    /// Percent of total, rounded to one decimal place.
    pub percent: f64,
}

pub struct DashboardPanel {
    config: Arc<ShieldConfig>,
    mode:   DashboardMode,
}

impl DashboardPanel {
    pub fn new(config: Arc<ShieldConfig>) -> Self {
        Self { config, mode: DashboardMode::default() }
    }

    pub fn mode(&self) -> DashboardMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DashboardMode) {
        log::debug!("dashboard: mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    pub fn insight(&self, language: Language) -> &str {
        let insights = &self.config.dashboard.insights;
        match self.mode {
            DashboardMode::Economy => insights.economy.text(language),
            DashboardMode::Savings => insights.savings.text(language),
            DashboardMode::Balance => insights.balance.text(language),
        }
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.config.dashboard.stats
    }

    pub fn total_spending(&self) -> i64 {
        self.config.dashboard.categories.iter().map(|c| c.amount).sum()
    }

    pub fn category_shares(&self, language: Language) -> Vec<CategoryShare<'_>> {
        let total = self.total_spending();
        self.config
            .dashboard
            .categories
            .iter()
            .map(|c| CategoryShare {
                key:     &c.key,
                name:    c.name.text(language),
                amount:  c.amount,
                percent: share_percent(c.amount, total),
            })
            .collect()
    }

    pub fn trends(&self) -> &[MonthlyTrend] {
        &self.config.dashboard.trends
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.config.dashboard.transactions
    }
}

impl Panel for DashboardPanel {
    fn tab(&self) -> Tab {
        Tab::Dashboard
    }

    fn teardown(&mut self) -> usize {
        0
    }
}

/// `part / total` as a percentage rounded to one decimal. Zero total gives 0.
pub fn share_percent(part: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}
